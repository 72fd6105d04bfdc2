//! `muruby create`

use anyhow::{Context, Result};
use clap::{ArgAction, Args};

use crate::config::{CreateOptions, GlobalConfig, ScaffoldConfig};
use crate::constants::{DEFAULT_ANDROID_PACKAGE, DEFAULT_MRUBY_SDL2_GEM};
use crate::native::NativeLibrary;
use crate::scaffold::Scaffold;

/// Create a new game project in the current directory.
#[derive(Args, Debug)]
pub struct CreateCommand {
    /// Name of the project, also the directory created.
    name: String,

    /// Build SDL2_mixer and its Android port.
    #[arg(long)]
    enable_sdl_mixer: bool,

    /// Build SDL2_ttf and its Android port.
    #[arg(long)]
    enable_sdl_ttf: bool,

    /// Build SDL2_image and its Android port.
    #[arg(long)]
    enable_sdl_image: bool,

    /// Use mruby master instead of the pinned release.
    #[arg(long)]
    mruby_unstable: bool,

    /// GitHub repository of the mruby SDL2 bindings, e.g. pichurriaj/mruby-sdl2.
    #[arg(long, value_name = "REPO", default_value = DEFAULT_MRUBY_SDL2_GEM)]
    dev_github_mruby_sdl2: String,

    /// Generate the Android project (needs ANDROID_NDK_HOME).
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    build_android: bool,

    /// Android package identifier.
    #[arg(long, value_name = "ID", default_value = DEFAULT_ANDROID_PACKAGE)]
    package: String,
}

impl CreateCommand {
    /// Scaffold the project under the current directory.
    pub async fn execute(self, global: &GlobalConfig, quiet: bool) -> Result<()> {
        let working_dir = std::env::current_dir().context("Failed to read current directory")?;
        let name = self.name.clone();
        let config = ScaffoldConfig::resolve(&name, &working_dir, self.into_options(quiet), global)?;
        tracing::debug!("Scaffold settings: {:?}", config);
        Scaffold::new(&config).run().await
    }

    fn into_options(self, quiet: bool) -> CreateOptions {
        let extensions = [
            (self.enable_sdl_image, NativeLibrary::Sdl2Image),
            (self.enable_sdl_ttf, NativeLibrary::Sdl2Ttf),
            (self.enable_sdl_mixer, NativeLibrary::Sdl2Mixer),
        ]
        .into_iter()
        .filter_map(|(enabled, library)| enabled.then_some(library))
        .collect();

        CreateOptions {
            extensions,
            mruby_unstable: self.mruby_unstable,
            sdl2_gem: self.dev_github_mruby_sdl2,
            build_android: self.build_android,
            package: self.package,
            quiet,
        }
    }
}
