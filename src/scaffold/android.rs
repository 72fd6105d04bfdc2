//! Android cross build and project generation.

use anyhow::Result;
use std::path::Path;

use super::Scaffold;
use crate::build_config::{self, gems};
use crate::config::AndroidTarget;
use crate::constants::{
    ANDROID_APP_NAME, ANDROID_GEMS_ANCHOR, ANDROID_GEMS_TAG, ANDROID_MANIFEST_PACKAGE,
    CROSS_BUILD_ANCHOR,
};
use crate::native::NativeLibrary;
use crate::utils::fs::replace_in_file;

/// Declare the Android cross build in mruby and lay out `core/build_android`.
pub(super) async fn configure(scaffold: &Scaffold<'_>, target: &AndroidTarget) -> Result<()> {
    let config = scaffold.config();
    let reporter = scaffold.reporter();
    let build_config = scaffold.build_config_path();

    reporter.step("configuring mruby for Android");
    build_config::insert_text(&build_config, CROSS_BUILD_ANCHOR, &gems::android_cross_build_block())
        .await?;
    let android_gems =
        gems::android_gems(&config.sdl2_gem, &config.build_host_path(), &target.ndk_home);
    build_config::generate_and_insert(&build_config, &android_gems, ANDROID_GEMS_ANCHOR, ANDROID_GEMS_TAG)
        .await?;

    let android_dir = config.build_android_path();
    reporter.step(format!("creating Android project in {}", android_dir.display()));
    config.skeleton.materialize_android(&android_dir)?;

    for library in config.libraries() {
        let port = config.android_library_path(library);
        scaffold.fetch_library(library, &port).await?;
        patch_android_mk(library, &port)?;
    }

    personalize(&android_dir, &config.app_name, &target.package)
}

/// Switch off the codec backends the port cannot build.
pub fn patch_android_mk(library: NativeLibrary, port_dir: &Path) -> Result<()> {
    let patches = library.android_mk_patches();
    if patches.is_empty() {
        return Ok(());
    }

    let makefile = port_dir.join("Android.mk");
    if !makefile.is_file() {
        tracing::warn!("{} has no Android.mk, backends left as shipped", port_dir.display());
        return Ok(());
    }
    for (from, to) in patches {
        replace_in_file(&makefile, from, to)?;
    }
    Ok(())
}

/// Write the package identifier and the application name into the project.
pub fn personalize(android_dir: &Path, app_name: &str, package: &str) -> Result<()> {
    replace_in_file(
        &android_dir.join("AndroidManifest.xml"),
        ANDROID_MANIFEST_PACKAGE,
        &format!("package=\"{package}\""),
    )?;
    replace_in_file(
        &android_dir.join("res").join("values").join("strings.xml"),
        ANDROID_APP_NAME,
        &format!("<string name=\"app_name\">{app_name}</string>"),
    )?;
    Ok(())
}
