//! Error formatting utilities for muruby
//!
//! Converts internal errors into clear, actionable messages for users.

use super::*;

/// Keywords that indicate network-related errors
const NETWORK_ERROR_KEYWORDS: &[&str] = &["network", "connection", "resolve host", "timed out"];

/// Keywords that indicate permission-related errors
const PERMISSION_ERROR_KEYWORDS: &[&str] = &["permission", "denied", "access"];

/// Convert any error into a user-friendly format with contextual suggestions
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Walk the chain: context layers wrap the typed error
    for cause in error.chain() {
        if let Some(muruby_error) = cause.downcast_ref::<MurubyError>() {
            return create_error_context(muruby_error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return ErrorContext::new(MurubyError::IoError(std::io::Error::new(
            io_error.kind(),
            io_error.to_string(),
        )))
        .with_suggestion("Check that the path exists and you have the necessary permissions")
        .with_details(format!("{error:#}"));
    }

    let error_msg = format!("{error:#}");

    if NETWORK_ERROR_KEYWORDS.iter().any(|&keyword| error_msg.contains(keyword)) {
        return ErrorContext::new(MurubyError::Other {
            message: error_msg,
        })
        .with_suggestion("Check your internet connection and re-run the command; finished steps are skipped");
    }

    if PERMISSION_ERROR_KEYWORDS.iter().any(|&keyword| error_msg.contains(keyword)) {
        return ErrorContext::new(MurubyError::Other {
            message: error_msg,
        })
        .with_suggestion("Check file permissions and try running with appropriate privileges");
    }

    ErrorContext::new(MurubyError::Other {
        message: error_msg,
    })
    .with_suggestion("Run again with --verbose to see every executed command")
}

/// Create a user-friendly error context from a [`MurubyError`]
pub fn create_error_context(error: &MurubyError) -> ErrorContext {
    match error {
        MurubyError::MissingEnvironment {
            variable,
            purpose,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Export {variable} before running, or pass --build-android false"
            ))
            .with_details(format!("{variable} is required for {purpose}")),
        MurubyError::InvalidFetcher {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Use one of the fetcher tags: curl, git, hg")
            .with_details("Fetcher tags are read from the [sources] table of the config file"),
        MurubyError::BuildArtifactMissing {
            library,
            artifact,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Build {library} by hand, then re-run the command; finished steps are skipped"
            ))
            .with_details(format!("Expected {} after installation", artifact.display())),
        MurubyError::ToolNotFound {
            program,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Install {program} or point the [tools] table of the config file at it"
            )),
        MurubyError::CommandFailed {
            stderr,
            code,
            ..
        } => {
            let ctx = ErrorContext::new(error.clone())
                .with_suggestion("Fix the problem reported by the tool and re-run the command");
            if stderr.trim().is_empty() {
                ctx.with_details(format!("Exit code: {code:?}"))
            } else {
                ctx.with_details(stderr.trim().to_string())
            }
        }
        MurubyError::AnchorNotFound {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("The mruby checkout may use a different build_config.rb layout; try the pinned release")
            .with_details("Generated gem blocks are inserted after literal anchor lines"),
        MurubyError::ConfigError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the syntax of the config file (TOML)"),
        MurubyError::IoError(_) | MurubyError::Other {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Run again with --verbose to see every executed command"),
    }
}
