//! External process execution
//!
//! muruby never links against the tools it orchestrates; it runs them. The
//! [`ToolCommand`] builder is the single entry point for doing so.

pub mod command_builder;

pub use command_builder::{ToolCommand, ToolCommandOutput};
