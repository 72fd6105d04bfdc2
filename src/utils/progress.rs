//! User-facing progress lines.
//!
//! Scaffolding prints one short line per step ("compiling SDL2 for host",
//! "Skipping SDL2..."). Diagnostics go through `tracing`; these lines are the
//! part the user is meant to read, so they are printed directly and colored.

use colored::Colorize;
use std::fmt::Display;

/// Prints step, skip and success lines unless quiet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    /// Create a reporter; `quiet` suppresses every line.
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self {
            quiet,
        }
    }

    /// A step is starting.
    pub fn step(&self, message: impl Display) {
        tracing::debug!("{}", message);
        if !self.quiet {
            println!("{} {}", "==>".cyan().bold(), message);
        }
    }

    /// A step was skipped because its output already exists.
    pub fn skip(&self, message: impl Display) {
        tracing::debug!("{}", message);
        if !self.quiet {
            println!("{} {}", "skip".yellow(), message);
        }
    }

    /// The whole command finished.
    pub fn success(&self, message: impl Display) {
        tracing::debug!("{}", message);
        if !self.quiet {
            println!("{} {}", "✓".green().bold(), message);
        }
    }
}
