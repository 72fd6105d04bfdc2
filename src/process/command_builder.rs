//! Type-safe command builder for external tool execution
//!
//! Every program muruby drives (git, hg, curl, tar, autotools, make, rake)
//! goes through [`ToolCommand`], so command logging, program lookup and error
//! mapping behave the same way for all of them.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::core::MurubyError;

/// Fluent builder for constructing and executing an external command.
///
/// # Examples
///
/// ```rust,no_run
/// use muruby::process::ToolCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// // Captured output
/// let head = ToolCommand::new("git")
///     .args(["rev-parse", "HEAD"])
///     .current_dir("/path/to/repo")
///     .execute_stdout()
///     .await?;
///
/// // Long-running build step, output streamed to the terminal
/// ToolCommand::new("make")
///     .arg("install")
///     .current_dir("/path/to/SDL2")
///     .inherit_stdio()
///     .with_context("SDL2")
///     .execute_success()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// # Default Configuration
///
/// - **Output capture**: enabled
/// - **Working directory**: current process directory
/// - **Environment**: inherited from the parent process
/// - **Timeout**: none; the tool decides how long it runs
#[derive(Debug, Clone)]
pub struct ToolCommand {
    /// Program name (looked up in PATH) or path to an executable
    program: String,

    /// Arguments in the order they were added
    args: Vec<String>,

    /// Working directory for command execution
    current_dir: Option<PathBuf>,

    /// Whether to capture command output (true) or inherit stdio (false)
    capture_output: bool,

    /// Extra environment variables for the process
    env_vars: Vec<(String, String)>,

    /// Optional label included in log lines (e.g. library name)
    context: Option<String>,
}

impl ToolCommand {
    /// Creates a builder for `program` with default settings.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            capture_output: true,
            env_vars: Vec::new(),
            context: None,
        }
    }

    /// Sets the working directory for the command.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds a path argument, rendered with [`Path::display`].
    pub fn path_arg(self, path: impl AsRef<Path>) -> Self {
        let rendered = path.as_ref().display().to_string();
        self.arg(rendered)
    }

    /// Adds an environment variable for the process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Lets the command write straight to the terminal.
    ///
    /// Build tools produce long output the user should see as it happens; on
    /// failure the error then carries only the exit code.
    pub const fn inherit_stdio(mut self) -> Self {
        self.capture_output = false;
        self
    }

    /// Set a label for log lines (e.g. the library being built).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Program this command will run.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments this command will pass.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The command line as a single string, for logs and error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Execute the command and return the captured output.
    pub async fn execute(self) -> Result<ToolCommandOutput> {
        let start = std::time::Instant::now();
        let command_line = self.command_line();

        let program = which::which(&self.program).map_err(|_| MurubyError::ToolNotFound {
            program: self.program.clone(),
        })?;

        let mut cmd = Command::new(&program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        match (&self.context, &self.current_dir) {
            (Some(ctx), Some(dir)) => tracing::debug!(
                target: "tool",
                "({}) Executing command: {} (in {})",
                ctx,
                command_line,
                dir.display()
            ),
            (Some(ctx), None) => {
                tracing::debug!(target: "tool", "({}) Executing command: {}", ctx, command_line);
            }
            (None, Some(dir)) => tracing::debug!(
                target: "tool",
                "Executing command: {} (in {})",
                command_line,
                dir.display()
            ),
            (None, None) => tracing::debug!(target: "tool", "Executing command: {}", command_line),
        }

        for (key, value) in &self.env_vars {
            tracing::trace!(target: "tool", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }

        if self.capture_output {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }

        let output =
            cmd.output().await.with_context(|| format!("Failed to execute {command_line}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let stdout = String::from_utf8_lossy(&output.stdout);

            tracing::debug!(
                target: "tool",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "tool", "Error: {}", stderr.trim());
            }

            return Err(MurubyError::CommandFailed {
                command: command_line,
                code: output.status.code(),
                // Some tools (curl -s, make) report on stdout only
                stderr: if stderr.is_empty() {
                    stdout.to_string()
                } else {
                    stderr
                },
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !stdout.is_empty() {
            tracing::trace!(target: "tool", "{}", stdout.trim());
        }
        if !stderr.is_empty() {
            tracing::trace!(target: "tool", "{}", stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::debug!(
                target: "tool::perf",
                "{} took {:.2}s",
                self.program,
                elapsed.as_secs_f64()
            );
        }

        Ok(ToolCommandOutput {
            stdout,
            stderr,
        })
    }

    /// Execute and return trimmed stdout.
    pub async fn execute_stdout(self) -> Result<String> {
        let output = self.execute().await?;
        Ok(output.stdout.trim().to_string())
    }

    /// Execute and discard output.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Captured output of a successful command.
#[derive(Debug)]
pub struct ToolCommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}
