//! User configuration for muruby.
//!
//! The optional file `~/.muruby/config.toml` (or the path given with `--config`
//! / `MURUBY_CONFIG`) overrides where sources come from, which programs are
//! run, and where the cache and skeleton templates live. A missing file means
//! built-in defaults.
//!
//! # File Format
//!
//! ```toml
//! cache_dir = "~/.cache/muruby"
//! skeleton_dir = "~/muruby-skel"
//!
//! [sources]
//! sdl_fetcher = "hg"
//! sdl2 = "http://hg.libsdl.org/SDL"
//! mruby = "https://github.com/mruby/mruby.git"
//!
//! [tools]
//! make = "gmake"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CACHE_DIR_VAR, CONFIG_PATH_VAR, DEFAULT_MRUBY_FETCHER, DEFAULT_MRUBY_URL,
    DEFAULT_SDL_FETCHER, DEFAULT_SDL2_IMAGE_URL, DEFAULT_SDL2_MIXER_URL, DEFAULT_SDL2_TTF_URL,
    DEFAULT_SDL2_URL,
};
use crate::core::MurubyError;
use crate::native::NativeLibrary;
use crate::utils::platform::get_home_dir;

/// Contents of the user config file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Cache location; `~` is expanded. `MURUBY_CACHE_DIR` still wins.
    #[serde(default)]
    pub cache_dir: Option<String>,

    /// Directory laid out like the built-in skeleton, used instead of it.
    #[serde(default)]
    pub skeleton_dir: Option<String>,

    /// Where third-party sources are fetched from.
    #[serde(default)]
    pub sources: SourceTable,

    /// Programs run by the scaffold.
    #[serde(default)]
    pub tools: ToolTable,
}

/// Remote source coordinates and the fetcher tag used for each family.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceTable {
    /// Fetcher tag for the SDL libraries (`curl`, `git` or `hg`)
    pub sdl_fetcher: String,
    /// SDL2
    pub sdl2: String,
    /// SDL2_image
    pub sdl2_image: String,
    /// SDL2_ttf
    pub sdl2_ttf: String,
    /// SDL2_mixer
    pub sdl2_mixer: String,
    /// Fetcher tag for mruby
    pub mruby_fetcher: String,
    /// mruby repository
    pub mruby: String,
}

impl Default for SourceTable {
    fn default() -> Self {
        Self {
            sdl_fetcher: DEFAULT_SDL_FETCHER.to_string(),
            sdl2: DEFAULT_SDL2_URL.to_string(),
            sdl2_image: DEFAULT_SDL2_IMAGE_URL.to_string(),
            sdl2_ttf: DEFAULT_SDL2_TTF_URL.to_string(),
            sdl2_mixer: DEFAULT_SDL2_MIXER_URL.to_string(),
            mruby_fetcher: DEFAULT_MRUBY_FETCHER.to_string(),
            mruby: DEFAULT_MRUBY_URL.to_string(),
        }
    }
}

impl SourceTable {
    /// Source coordinate of a native library.
    #[must_use]
    pub fn library(&self, library: NativeLibrary) -> &str {
        match library {
            NativeLibrary::Sdl2 => &self.sdl2,
            NativeLibrary::Sdl2Image => &self.sdl2_image,
            NativeLibrary::Sdl2Ttf => &self.sdl2_ttf,
            NativeLibrary::Sdl2Mixer => &self.sdl2_mixer,
        }
    }
}

/// Program names or paths for every external tool.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolTable {
    /// git
    pub git: String,
    /// Mercurial
    pub hg: String,
    /// curl
    pub curl: String,
    /// tar
    pub tar: String,
    /// make
    pub make: String,
    /// rake, mruby's build tool
    pub rake: String,
}

impl Default for ToolTable {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            hg: "hg".to_string(),
            curl: "curl".to_string(),
            tar: "tar".to_string(),
            make: "make".to_string(),
            rake: "rake".to_string(),
        }
    }
}

impl GlobalConfig {
    /// Load from `path`, or from [`default_path`](Self::default_path) when `None`.
    ///
    /// A file that does not exist yields the defaults.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and parse a specific config file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = toml::from_str(&content).map_err(|e| MurubyError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// `MURUBY_CONFIG` if set, otherwise `~/.muruby/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            return Ok(PathBuf::from(path));
        }
        Ok(get_home_dir()?.join(".muruby").join("config.toml"))
    }

    /// Cache directory: `MURUBY_CACHE_DIR`, then `cache_dir`, then `~/.muruby/cache`.
    pub fn resolve_cache_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CACHE_DIR_VAR) {
            return Ok(PathBuf::from(dir));
        }
        self.resolve_cache_dir_without_env()
    }

    fn resolve_cache_dir_without_env(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => expand_path(dir),
            None => Ok(get_home_dir()?.join(".muruby").join("cache")),
        }
    }

    /// Custom skeleton directory, with `~` expanded.
    pub fn resolve_skeleton_dir(&self) -> Result<Option<PathBuf>> {
        self.skeleton_dir.as_deref().map(expand_path).transpose()
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|e| MurubyError::ConfigError {
        message: format!("Cannot expand path '{raw}': {e}"),
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}
