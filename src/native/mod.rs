//! Native libraries compiled for the host
//!
//! SDL2 is the base multimedia library; SDL2_image, SDL2_ttf and SDL2_mixer
//! are optional extensions that link against its install prefix. Each library
//! knows where it lives in a project, which artifact proves it was installed,
//! and which codec backends are disabled in its Android port.

mod driver;

pub use driver::{BuildOutcome, BuildStep, NativeBuildDriver};

use std::fmt;

/// One of the SDL2 libraries a project can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeLibrary {
    /// SDL2 itself
    Sdl2,
    /// Image loading extension
    Sdl2Image,
    /// TrueType font extension
    Sdl2Ttf,
    /// Audio mixing extension
    Sdl2Mixer,
}

impl NativeLibrary {
    /// Optional extensions, in build order.
    pub const EXTENSIONS: [Self; 3] = [Self::Sdl2Image, Self::Sdl2Ttf, Self::Sdl2Mixer];

    /// Library name, also the directory name under `core/`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sdl2 => "SDL2",
            Self::Sdl2Image => "SDL2_image",
            Self::Sdl2Ttf => "SDL2_ttf",
            Self::Sdl2Mixer => "SDL2_mixer",
        }
    }

    /// Directory name of the Android port under `jni/`.
    #[must_use]
    pub const fn android_dir_name(self) -> &'static str {
        match self {
            Self::Sdl2 => "SDL",
            Self::Sdl2Image => "SDL_image",
            Self::Sdl2Ttf => "SDL_ttf",
            Self::Sdl2Mixer => "SDL_mixer",
        }
    }

    /// Shared object installed under `<prefix>/lib`.
    #[must_use]
    pub const fn artifact_name(self) -> &'static str {
        match self {
            Self::Sdl2 => "libSDL2.so",
            Self::Sdl2Image => "libSDL2_image.so",
            Self::Sdl2Ttf => "libSDL2_ttf.so",
            Self::Sdl2Mixer => "libSDL2_mixer.so",
        }
    }

    /// Whether this library links against the base SDL2 install.
    #[must_use]
    pub const fn is_extension(self) -> bool {
        !matches!(self, Self::Sdl2)
    }

    /// Whether `make clean` runs after installation.
    ///
    /// SDL2_mixer keeps its objects; its tree is left as built.
    #[must_use]
    pub const fn cleans_after_install(self) -> bool {
        !matches!(self, Self::Sdl2Mixer)
    }

    /// Literal `Android.mk` substitutions that switch off optional backends.
    #[must_use]
    pub const fn android_mk_patches(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Sdl2 => &[],
            Self::Sdl2Image => &[("SUPPORT_WEBP := true", "SUPPORT_WEBP := false")],
            Self::Sdl2Ttf => &[("SUPPORT_JPG := true", "SUPPORT_JPG := false")],
            Self::Sdl2Mixer => &[
                ("SUPPORT_MOD_MODPLUG := true", "SUPPORT_MOD_MODPLUG := false"),
                ("SUPPORT_MOD_MIKMOD := true", "SUPPORT_MOD_MIKMOD := false"),
                ("SUPPORT_MP3_SMPEG := true", "SUPPORT_MP3_SMPEG := false"),
            ],
        }
    }
}

impl fmt::Display for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
