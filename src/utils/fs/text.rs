//! Literal text substitution in template files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::atomic::atomic_write;

/// Replaces every occurrence of `from` with `to` in the file at `path`.
///
/// Matching is literal, no patterns. Returns whether the file changed; a file
/// without `from` is left untouched on disk.
pub fn replace_in_file(path: &Path, from: &str, to: &str) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !content.contains(from) {
        tracing::debug!("'{}' not present in {}", from, path.display());
        return Ok(false);
    }

    atomic_write(path, content.replace(from, to).as_bytes())?;
    Ok(true)
}
