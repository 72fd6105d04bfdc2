//! The gem sets written into mruby's `build_config.rb`.

use std::path::Path;

use super::dependency::{CompilerFlags, Dependency, GithubGem};
use crate::constants::{ANDROID_GEMS_ANCHOR, MRUBY_PRINT_ANDROID_GEM};

const COMMON_GEMS: [&str; 14] = [
    "mrbgems/mruby-math",
    "mrbgems/mruby-enum-ext",
    "mrbgems/mruby-random",
    "mrbgems/mruby-proc-ext",
    "mrbgems/mruby-exit",
    "mrbgems/mruby-fiber",
    "mrbgems/mruby-struct",
    "mrbgems/mruby-sprintf",
    "mrbgems/mruby-string-ext",
    "mrbgems/mruby-object-ext",
    "mrbgems/mruby-array-ext",
    "mrbgems/mruby-hash-ext",
    "mrbgems/mruby-symbol-ext",
    "mrbgems/mruby-eval",
];

const HOST_TOOL_GEMS: [&str; 3] =
    ["mrbgems/mruby-print", "mrbgems/mruby-bin-mirb", "mrbgems/mruby-bin-mruby"];

const HOST_SYSTEM_GEMS: [&str; 4] =
    ["iij/mruby-dir", "iij/mruby-io", "iij/mruby-tempfile", "iij/mruby-require"];

const GEM_BRANCH: &str = "master";

/// Bundled gems shared by the host and Android builds.
#[must_use]
pub fn common_gems() -> Vec<Dependency> {
    COMMON_GEMS.iter().map(|name| Dependency::name(*name)).collect()
}

/// Gems of the host builds: SDL2 bindings linked against `build_host`, the
/// command line tools, the common set, then filesystem and `require` support.
#[must_use]
pub fn host_gems(sdl2_gem: &str, build_host: &Path) -> Vec<Dependency> {
    let flags = CompilerFlags::new()
        .append("cc.include_paths", [build_host.join("include").display().to_string()])
        .append("linker.libraries", ["SDL2"])
        .append("linker.library_paths", [build_host.join("lib").display().to_string()]);

    let mut gems: Vec<Dependency> =
        vec![GithubGem::new(sdl2_gem, GEM_BRANCH).with_flags(flags).into()];
    gems.extend(HOST_TOOL_GEMS.iter().map(|name| Dependency::name(*name)));
    gems.extend(common_gems());
    gems.extend(HOST_SYSTEM_GEMS.iter().map(|repo| GithubGem::new(*repo, GEM_BRANCH).into()));
    gems
}

/// Gems of the Android cross build. Libraries are linked by the NDK build, so
/// only include paths are set.
#[must_use]
pub fn android_gems(sdl2_gem: &str, build_host: &Path, ndk_home: &Path) -> Vec<Dependency> {
    let flags = CompilerFlags::new().append(
        "cc.include_paths",
        [
            build_host.join("include").display().to_string(),
            format!("{}/sources/android/support/include/", ndk_home.display()),
        ],
    );

    let mut gems: Vec<Dependency> = vec![
        GithubGem::new(sdl2_gem, GEM_BRANCH).with_flags(flags).into(),
        GithubGem::new(MRUBY_PRINT_ANDROID_GEM, GEM_BRANCH).into(),
    ];
    gems.extend(common_gems());
    gems
}

/// `MRuby::CrossBuild` declaration for Android, carrying its own gem anchor.
#[must_use]
pub fn android_cross_build_block() -> String {
    format!(
        "#AUTOMATIC CROSSBUILD ANDROID\n\
         MRuby::CrossBuild.new('androideabi') do |conf|\n\
         toolchain :androideabi\n\
         conf.cc.defines = %w(DISABLE_STDIO)\n\
         conf.bins = []\n\
         {ANDROID_GEMS_ANCHOR}\n\
         end\n"
    )
}
