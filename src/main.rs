//! muruby CLI entry point
//!
//! Parses arguments, runs the selected command and turns any error into a
//! colored message with a suggestion before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use muruby::cli;
use muruby::core::user_friendly_error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
