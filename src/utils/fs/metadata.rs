//! Directory size calculation.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Total size in bytes of the regular files under `path`.
///
/// Symbolic links are not followed. A missing directory has size 0.
pub fn dir_size(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Ok(0);
    }

    let mut size = 0;
    for entry in WalkDir::new(path) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory: {}", path.display()))?;
        if entry.file_type().is_file() {
            size += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }
    Ok(size)
}

/// Async wrapper over [`dir_size`] running on the blocking pool.
pub async fn get_directory_size(path: &Path) -> Result<u64> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || dir_size(&path))
        .await
        .context("Failed to join directory size calculation task")?
}
