//! File system helpers
//!
//! Synchronous helpers for the handful of tree operations the scaffold needs:
//! creating and copying directories, atomic rewrites, measuring the cache,
//! and the literal text substitution used to patch template files.

pub mod atomic;
pub mod dirs;
pub mod metadata;
pub mod text;

pub use atomic::atomic_write;
pub use dirs::{copy_dir, ensure_dir};
pub use metadata::{dir_size, get_directory_size};
pub use text::replace_in_file;
