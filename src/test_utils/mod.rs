//! Test utilities for muruby
//!
//! Fixtures for unit tests that drive real tools: local git repositories to
//! clone from and tarballs to unpack. Tests that need a tool call
//! [`tool_available`] first and return early without it.

pub mod git_helper;

pub use git_helper::TestGit;

use std::path::Path;
use std::process::Command;

/// Whether `program` can be found in PATH.
pub fn tool_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Pack `top_dir` (a directory inside `parent`) into `archive` with `tar -czf`.
pub fn make_tarball(parent: &Path, top_dir: &str, archive: &Path) {
    let status = Command::new("tar")
        .arg("-czf")
        .arg(archive)
        .arg("-C")
        .arg(parent)
        .arg(top_dir)
        .status()
        .unwrap();
    assert!(status.success(), "tar -czf failed for {}", archive.display());
}
