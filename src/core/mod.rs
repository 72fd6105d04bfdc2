//! Core types and error handling for muruby
//!
//! - [`MurubyError`] enumerates the failures muruby reports with a dedicated
//!   message.
//! - [`ErrorContext`] pairs an error with details and a suggestion for display.
//! - [`user_friendly_error`] converts any `anyhow::Error` into an
//!   [`ErrorContext`], looking through context layers for a [`MurubyError`].

pub mod error;
mod error_formatting;

pub use error::{ErrorContext, MurubyError};
pub use error_formatting::{create_error_context, user_friendly_error};
