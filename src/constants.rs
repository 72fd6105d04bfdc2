//! Global constants used throughout the muruby codebase.
//!
//! Default source coordinates, pinned references, anchor lines of mruby's
//! `build_config.rb` and the literal strings patched in the Android skeleton.
//! Source URLs can be overridden through the `[sources]` table of the user
//! config; everything else is fixed.

/// SDL2 release archive.
pub const DEFAULT_SDL2_URL: &str = "https://www.libsdl.org/release/SDL2-2.0.1.tar.gz";

/// SDL2_image release archive.
pub const DEFAULT_SDL2_IMAGE_URL: &str =
    "https://www.libsdl.org/projects/SDL_image/release/SDL2_image-2.0.0.tar.gz";

/// SDL2_mixer release archive.
pub const DEFAULT_SDL2_MIXER_URL: &str =
    "https://www.libsdl.org/projects/SDL_mixer/release/SDL2_mixer-2.0.0.tar.gz";

/// SDL2_ttf release archive.
pub const DEFAULT_SDL2_TTF_URL: &str =
    "https://www.libsdl.org/projects/SDL_ttf/release/SDL2_ttf-2.0.12.tar.gz";

/// mruby repository.
pub const DEFAULT_MRUBY_URL: &str = "https://github.com/mruby/mruby.git";

/// Fetcher tag used for the SDL sources.
pub const DEFAULT_SDL_FETCHER: &str = "curl";

/// Fetcher tag used for mruby.
pub const DEFAULT_MRUBY_FETCHER: &str = "git";

/// mruby release the scaffold is known to work with.
pub const MRUBY_STABLE_REF: &str = "1.1.0";

/// Reference checked out with `--mruby-unstable`.
pub const MRUBY_UNSTABLE_REF: &str = "master";

/// GitHub coordinate of the SDL2 bindings gem.
pub const DEFAULT_MRUBY_SDL2_GEM: &str = "pichurriaj/mruby-sdl2";

/// GitHub coordinate of the Android print gem.
pub const MRUBY_PRINT_ANDROID_GEM: &str = "pichurriaj/mruby-print-android";

/// Default Android package identifier.
pub const DEFAULT_ANDROID_PACKAGE: &str = "com.pichurriajuegos.muruby";

/// Environment variable pointing at the Android NDK.
pub const ANDROID_NDK_HOME_VAR: &str = "ANDROID_NDK_HOME";

/// Environment variable overriding the cache location.
pub const CACHE_DIR_VAR: &str = "MURUBY_CACHE_DIR";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_VAR: &str = "MURUBY_CONFIG";

/// Name of mruby's build description file.
pub const BUILD_CONFIG_FILE: &str = "build_config.rb";

/// Anchor of the release host build.
pub const HOST_BUILD_ANCHOR: &str = "MRuby::Build.new do |conf|";

/// Provenance tag of gems generated for the release host build.
pub const HOST_BUILD_TAG: &str = "#AUTOMATIC MRBGEMS --NO EDIT--";

/// Anchor of the debug host build.
pub const DEBUG_BUILD_ANCHOR: &str = "MRuby::Build.new('host-debug') do |conf|";

/// Provenance tag of gems generated for the debug host build.
pub const DEBUG_BUILD_TAG: &str = "#AUTOMATIC MRBGEMS DEBUG --NO EDIT--";

/// Anchor below which the Android cross build is declared.
pub const CROSS_BUILD_ANCHOR: &str = "# Define cross build settings";

/// Anchor inside the generated Android cross build.
pub const ANDROID_GEMS_ANCHOR: &str = "#AUTOMATIC GEMS ANDROID --NO EDIT--";

/// Provenance tag of gems generated for the Android cross build.
pub const ANDROID_GEMS_TAG: &str = "#AUTOMATIC ANDROID MRBGEMS";

/// Package attribute of the Android manifest template.
pub const ANDROID_MANIFEST_PACKAGE: &str = "package=\"com.pichurriajuegos.muruby\"";

/// Application name of the Android string resources template.
pub const ANDROID_APP_NAME: &str = "<string name=\"app_name\">muruby</string>";
