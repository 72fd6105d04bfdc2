//! Atomic file writes: temp file in the same directory, then rename.
//!
//! Patched build descriptions and templates are rewritten whole; a crash
//! mid-write leaves either the old or the new file, never a truncated one.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Replace the file at `path` with `content`.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".muruby-write-")
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
