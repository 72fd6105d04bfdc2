//! Generated gem declarations in mruby's `build_config.rb`
//!
//! mruby describes its builds in Ruby. Rather than parse that file, muruby
//! inserts text after literal anchor lines that mruby's stock configuration
//! already contains (`MRuby::Build.new do |conf|` and friends). Each rendered
//! [`Dependency`] is preceded by a tag comment marking it as generated.
//!
//! Insertion is not deduplicated: running generation twice against the same
//! anchor leaves two copies. Every insertion lands directly below its anchor,
//! so the latest one sits closest to it.

mod dependency;
pub mod gems;

pub use dependency::{CompilerFlags, Dependency, FlagValue, GithubGem};

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::core::MurubyError;
use crate::utils::fs::atomic_write;

/// Concatenated fragments of `dependencies`, each preceded by `tag`.
#[must_use]
pub fn render_fragments(dependencies: &[Dependency], tag: &str) -> String {
    dependencies.iter().map(|dependency| dependency.render(tag)).collect()
}

/// `content` with `text` inserted after the first line equal to `anchor`.
///
/// Lines are compared without their terminator (`\n` or `\r\n`). Returns
/// `None` when no line matches.
#[must_use]
pub fn insert_after_anchor(content: &str, anchor: &str, text: &str) -> Option<String> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim_end_matches(['\r', '\n']) == anchor {
            let mut out = String::with_capacity(content.len() + text.len() + 1);
            out.push_str(&content[..end]);
            if !line.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(text);
            out.push_str(&content[end..]);
            return Some(out);
        }
        offset = end;
    }
    None
}

/// Insert `text` after `anchor` in the file at `target`.
///
/// # Errors
///
/// [`MurubyError::AnchorNotFound`] when no line of the file equals `anchor`.
pub async fn insert_text(target: &Path, anchor: &str, text: &str) -> Result<()> {
    let content = fs::read_to_string(target)
        .await
        .with_context(|| format!("Failed to read {}", target.display()))?;

    let updated =
        insert_after_anchor(&content, anchor, text).ok_or_else(|| MurubyError::AnchorNotFound {
            anchor: anchor.to_string(),
            file: target.to_path_buf(),
        })?;

    let path = target.to_path_buf();
    tokio::task::spawn_blocking(move || atomic_write(&path, updated.as_bytes()))
        .await
        .context("File write task panicked")??;
    Ok(())
}

/// Render `dependencies` with `tag` and insert them after `anchor` in `target`.
pub async fn generate_and_insert(
    target: &Path,
    dependencies: &[Dependency],
    anchor: &str,
    tag: &str,
) -> Result<()> {
    tracing::debug!(
        "Inserting {} gems after '{}' in {}",
        dependencies.len(),
        anchor,
        target.display()
    );
    insert_text(target, anchor, &render_fragments(dependencies, tag)).await
}
