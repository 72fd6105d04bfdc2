//! Configuration for muruby
//!
//! Two layers:
//!
//! 1. [`GlobalConfig`] - the optional user file `~/.muruby/config.toml`:
//!    source URLs, fetcher tags, tool programs, cache and skeleton locations.
//! 2. [`ScaffoldConfig`] - everything one `create` run needs, resolved once
//!    from the command line, the environment and the user file, then passed
//!    by reference to every step.

mod global;
mod scaffold;

pub use global::{GlobalConfig, SourceTable, ToolTable};
pub use scaffold::{AndroidTarget, CreateOptions, ScaffoldConfig};
