//! Command-line interface for muruby.
//!
//! # Available Commands
//!
//! - `create <NAME>` - scaffold a new game project (see [`create::CreateCommand`])
//! - `cache path|list|clean` - inspect or empty the local cache (see [`cache::CacheCommand`])
//!
//! # Global Options
//!
//! - `-v, --verbose` - debug logging, including every external command run
//! - `-q, --quiet` - only warnings and errors; progress lines are suppressed
//! - `-c, --config <FILE>` - user config file instead of `~/.muruby/config.toml`
//!
//! `RUST_LOG` overrides the level chosen by `--verbose` / `--quiet`.
//!
//! ```bash
//! muruby create mygame --enable-sdl-ttf --build-android false
//! muruby -v create mygame --mruby-unstable
//! muruby cache list
//! ```

pub mod cache;
pub mod create;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Suppress progress lines.
    pub quiet: bool,

    /// Explicit user config file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the tracing subscriber. `RUST_LOG` wins over `log_level`.
    ///
    /// Logs go to stderr so stdout stays reserved for progress and command
    /// output. Calling this twice is harmless.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Scaffold mruby + SDL2 game projects for the desktop and Android.
#[derive(Parser, Debug)]
#[command(
    name = "muruby",
    about = "Scaffold mruby + SDL2 game projects for GNU/Linux and Android",
    version,
    long_about = "muruby creates a game project embedding mruby and SDL2: it fetches the \
                  sources, builds SDL2 for the host, configures mruby's build and generates \
                  an Android project."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output, including every external command run.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the user config file.
    ///
    /// Defaults to `MURUBY_CONFIG`, then `~/.muruby/config.toml`. A missing
    /// file means built-in defaults.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a directory <NAME> with everything needed to build games for
    /// Android and GNU/Linux.
    Create(create::CreateCommand),

    /// Inspect or clean the local cache of downloads and mirrors.
    Cache(cache::CacheCommand),
}

impl Cli {
    /// Initialize logging, load the user config and run the subcommand.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Run the subcommand with an explicit [`CliConfig`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Commands::Create(cmd) => cmd.execute(&global, config.quiet).await,
            Commands::Cache(cmd) => cmd.execute(&global).await,
        }
    }
}
