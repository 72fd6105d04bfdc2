//! Tarball downloads.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cache::Cache;
use crate::core::MurubyError;
use crate::process::ToolCommand;

/// Downloads a `.tar.gz` into the cache with `curl` and unpacks it with `tar`.
///
/// The download resumes from the bytes already in the cache (`curl -C -`), so
/// an interrupted transfer continues on the next run. HTTP errors fail the
/// download, and an archive `tar` cannot read is dropped from the cache so the
/// next run downloads it afresh. The archive's top-level
/// directory (named after the archive without its extension) becomes the
/// destination.
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    cache: Cache,
    curl: String,
    tar: String,
}

impl ArchiveFetcher {
    /// Fetcher running `curl` and `tar`.
    pub fn new(cache: Cache, curl: impl Into<String>, tar: impl Into<String>) -> Self {
        Self {
            cache,
            curl: curl.into(),
            tar: tar.into(),
        }
    }

    pub(super) const fn cache(&self) -> &Cache {
        &self.cache
    }

    pub(super) async fn fetch(&self, destination: &Path, url: &str, options: &[String]) -> Result<()> {
        let file_name = archive_file_name(url)?;
        let archive = self.cache.entry_path(file_name);

        // --fail keeps HTTP error pages out of the cache
        ToolCommand::new(&self.curl)
            .args(["--fail", "-L", "-C", "-", "-o"])
            .path_arg(&archive)
            .arg(url)
            .args(options.iter().cloned())
            .with_context(file_name)
            .execute_success()
            .await?;

        // Unpack next to the destination so the final move is a rename.
        let parent = destination.parent().unwrap_or_else(|| Path::new("."));
        let staging = tempfile::Builder::new()
            .prefix(".muruby-unpack-")
            .tempdir_in(parent)
            .with_context(|| format!("Failed to create staging directory in {}", parent.display()))?;

        let unpacked = ToolCommand::new(&self.tar)
            .arg("-xzf")
            .path_arg(&archive)
            .arg("-C")
            .path_arg(staging.path())
            .with_context(file_name)
            .execute_success()
            .await;
        if let Err(err) = unpacked {
            // A resumed download would only append to the broken bytes.
            tracing::warn!(target: "fetch", "Discarding unreadable archive {}", archive.display());
            if let Err(remove_err) = tokio::fs::remove_file(&archive).await {
                tracing::debug!(target: "fetch", "Could not remove {}: {}", archive.display(), remove_err);
            }
            return Err(err);
        }

        let root = unpacked_root(staging.path(), archive_stem(file_name))?;
        tokio::fs::rename(&root, destination).await.with_context(|| {
            format!("Failed to move {} to {}", root.display(), destination.display())
        })?;

        tracing::debug!(target: "fetch", "Unpacked {} into {}", file_name, destination.display());
        Ok(())
    }
}

/// File name an archive URL is cached under: its last path segment.
///
/// # Examples
///
/// ```rust
/// use muruby::fetch::archive_file_name;
///
/// let name = archive_file_name("https://www.libsdl.org/release/SDL2-2.0.1.tar.gz").unwrap();
/// assert_eq!(name, "SDL2-2.0.1.tar.gz");
/// ```
pub fn archive_file_name(url: &str) -> Result<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url).trim_end_matches('/');
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() && !name.ends_with(':') => Ok(name),
        _ => Err(MurubyError::Other {
            message: format!("Cannot derive an archive name from '{url}'"),
        }
        .into()),
    }
}

/// Directory an archive is expected to unpack into.
#[must_use]
pub fn archive_stem(file_name: &str) -> &str {
    file_name
        .strip_suffix(".tar.gz")
        .or_else(|| file_name.strip_suffix(".tgz"))
        .unwrap_or(file_name)
}

/// The unpacked top directory: `<staging>/<stem>`, or the only directory
/// present when the archive uses another name.
fn unpacked_root(staging: &Path, stem: &str) -> Result<PathBuf> {
    let expected = staging.join(stem);
    if expected.is_dir() {
        return Ok(expected);
    }

    let dirs: Vec<PathBuf> = std::fs::read_dir(staging)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    match dirs.as_slice() {
        [only] => Ok(only.clone()),
        _ => Err(MurubyError::Other {
            message: format!("Archive did not unpack into a single '{stem}' directory"),
        }
        .into()),
    }
}
