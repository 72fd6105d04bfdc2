//! Error handling for muruby
//!
//! Scaffolding is a long linear sequence of external tool invocations, so the
//! error model stays small. Two kinds of failure are recognised as *fatal
//! preconditions or outcomes* of the scaffold itself:
//!
//! - **Preconditions**: [`MurubyError::MissingEnvironment`] and
//!   [`MurubyError::InvalidFetcher`] are raised before any work is attempted.
//! - **Missing build artifacts**: [`MurubyError::BuildArtifactMissing`] is raised
//!   when a native library's installed output is still absent after its build
//!   sequence ran.
//!
//! Everything else (network, VCS, compiler failures) comes from an external
//! program and is surfaced as [`MurubyError::CommandFailed`] or
//! [`MurubyError::ToolNotFound`], carrying whatever the tool printed.
//!
//! Use [`user_friendly_error`](super::user_friendly_error) to turn any
//! `anyhow::Error` into an [`ErrorContext`] for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use muruby::core::{ErrorContext, MurubyError};
//!
//! let context = ErrorContext::new(MurubyError::InvalidFetcher {
//!     tag: "svn".to_string(),
//! })
//! .with_suggestion("Use one of: curl, git, hg");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure muruby reports with a dedicated message.
#[derive(Error, Debug)]
pub enum MurubyError {
    /// A required environment variable is not set.
    #[error("Need environment variable {variable}")]
    MissingEnvironment {
        /// Name of the variable
        variable: String,
        /// What the variable is needed for
        purpose: String,
    },

    /// A fetcher tag does not name any known acquisition strategy.
    #[error("Invalid fetcher '{tag}'")]
    InvalidFetcher {
        /// The unrecognised tag
        tag: String,
    },

    /// A native library build finished but its artifact was never installed.
    #[error("Failed compiling {library}, build manually {}", source_dir.display())]
    BuildArtifactMissing {
        /// Library name (e.g. `SDL2_image`)
        library: String,
        /// Directory holding the library sources
        source_dir: PathBuf,
        /// Artifact that was expected after installation
        artifact: PathBuf,
    },

    /// An external program could not be located.
    #[error("{program} is not installed or not found in PATH")]
    ToolNotFound {
        /// Program name or path
        program: String,
    },

    /// An external program exited unsuccessfully.
    #[error("Command failed: {command}")]
    CommandFailed {
        /// Full command line as executed
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured standard error (empty when stdio was inherited)
        stderr: String,
    },

    /// The anchor line for a configuration insertion is not in the file.
    #[error("Anchor '{anchor}' not found in {}", file.display())]
    AnchorNotFound {
        /// Literal anchor line
        anchor: String,
        /// File that was searched
        file: PathBuf,
    },

    /// The user configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else, carried as a message.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for MurubyError {
    fn clone(&self) -> Self {
        match self {
            Self::MissingEnvironment {
                variable,
                purpose,
            } => Self::MissingEnvironment {
                variable: variable.clone(),
                purpose: purpose.clone(),
            },
            Self::InvalidFetcher {
                tag,
            } => Self::InvalidFetcher {
                tag: tag.clone(),
            },
            Self::BuildArtifactMissing {
                library,
                source_dir,
                artifact,
            } => Self::BuildArtifactMissing {
                library: library.clone(),
                source_dir: source_dir.clone(),
                artifact: artifact.clone(),
            },
            Self::ToolNotFound {
                program,
            } => Self::ToolNotFound {
                program: program.clone(),
            },
            Self::CommandFailed {
                command,
                code,
                stderr,
            } => Self::CommandFailed {
                command: command.clone(),
                code: *code,
                stderr: stderr.clone(),
            },
            Self::AnchorNotFound {
                anchor,
                file,
            } => Self::AnchorNotFound {
                anchor: anchor.clone(),
                file: file.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error is not Clone; keep the kind and the rendered message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// An error paired with optional details and a suggested fix.
///
/// This is what the binary prints when a command fails: the error in red,
/// details in yellow, the suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MurubyError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    #[must_use]
    pub const fn new(error: MurubyError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_environment_message() {
        let error = MurubyError::MissingEnvironment {
            variable: "ANDROID_NDK_HOME".to_string(),
            purpose: "Android builds".to_string(),
        };
        assert_eq!(error.to_string(), "Need environment variable ANDROID_NDK_HOME");
    }

    #[test]
    fn test_build_artifact_missing_names_library_and_source() {
        let error = MurubyError::BuildArtifactMissing {
            library: "SDL2_ttf".to_string(),
            source_dir: PathBuf::from("/tmp/demo/core/SDL2_ttf"),
            artifact: PathBuf::from("/tmp/demo/core/build_host/lib/libSDL2_ttf.so"),
        };
        let message = error.to_string();
        assert!(message.contains("SDL2_ttf"));
        assert!(message.contains("build manually /tmp/demo/core/SDL2_ttf"));
    }

    #[test]
    fn test_clone_preserves_io_kind() {
        let error = MurubyError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "nope",
        ));
        match error.clone() {
            MurubyError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("unexpected clone: {other:?}"),
        }
    }

    #[test]
    fn test_error_context_display_includes_suggestion() {
        let context = ErrorContext::new(MurubyError::InvalidFetcher {
            tag: "svn".to_string(),
        })
        .with_details("details here")
        .with_suggestion("use git");

        let rendered = context.to_string();
        assert!(rendered.starts_with("Invalid fetcher 'svn'"));
        assert!(rendered.contains("Details: details here"));
        assert!(rendered.contains("Suggestion: use git"));
    }
}
