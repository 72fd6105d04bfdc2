//! Utilities shared by the scaffold steps
//!
//! - [`fs`] - directory copying, cache sizing and literal file patching
//! - [`platform`] - home directory resolution
//! - [`progress`] - user-facing progress lines

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{copy_dir, ensure_dir};
pub use platform::get_home_dir;
pub use progress::Reporter;
