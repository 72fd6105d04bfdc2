//! Local cache of downloaded archives and mirror clones
//!
//! One cache per invoking user, shared by every project that user scaffolds.
//! Entries are keyed by basename: an archive is stored under its file name,
//! a DVCS mirror under the basename of the project directory it feeds.
//!
//! ```text
//! ~/.muruby/cache/
//! ├── SDL2-2.0.1.tar.gz        # archive, resumable with curl -C -
//! ├── SDL2_image-2.0.0.tar.gz
//! ├── mruby/                   # mirror clone of the mruby repository
//! └── SDL/                     # mirror clone of the SDL Android port
//! ```
//!
//! The scaffold never expires entries; `muruby cache clean` is the only way
//! they go away. The cache is not locked: two concurrent scaffolds fetching
//! the same entry race.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use crate::config::GlobalConfig;
use crate::utils::fs;

/// Handle on the cache directory.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

/// One file or directory at the top level of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Basename key
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Whether this is a mirror clone (directory) rather than an archive
    pub is_dir: bool,
    /// Size on disk in bytes
    pub size: u64,
}

impl Cache {
    /// Cache at the location resolved from `config` and `MURUBY_CACHE_DIR`.
    pub fn new(config: &GlobalConfig) -> Result<Self> {
        Ok(Self::with_dir(config.resolve_cache_dir()?))
    }

    /// Cache rooted at `dir`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use muruby::cache::Cache;
    ///
    /// let cache = Cache::with_dir(std::env::temp_dir().join("muruby-cache"));
    /// assert!(cache.entry_path("mruby").ends_with("mruby"));
    /// ```
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
        }
    }

    /// Create the cache directory if needed. Safe to call repeatedly.
    pub async fn ensure_cache_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            async_fs::create_dir_all(&self.dir).await.with_context(|| {
                format!("Failed to create cache directory: {}", self.dir.display())
            })?;
        }
        Ok(())
    }

    /// Root directory of the cache.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry keyed by `name`.
    #[must_use]
    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Top-level entries sorted by name; empty when the cache does not exist.
    pub async fn list_entries(&self) -> Result<Vec<CacheEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut read_dir = async_fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read cache directory: {}", self.dir.display()))?;
        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            let size = if file_type.is_dir() {
                fs::get_directory_size(&path).await?
            } else {
                entry.metadata().await?.len()
            };
            entries.push(CacheEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir: file_type.is_dir(),
                size,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Total size of the cache in bytes.
    pub async fn size(&self) -> Result<u64> {
        fs::get_directory_size(&self.dir).await
    }

    /// Remove the whole cache directory.
    pub async fn clear_all(&self) -> Result<()> {
        if self.dir.exists() {
            async_fs::remove_dir_all(&self.dir).await.with_context(|| {
                format!("Failed to clear cache at {}", self.dir.display())
            })?;
            tracing::debug!("Cleared cache at {}", self.dir.display());
        }
        Ok(())
    }
}
