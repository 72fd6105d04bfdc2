//! Host build driver for the SDL2 libraries.
//!
//! A build is a fixed sequence of [`BuildStep`]s run inside the library's
//! source directory. The driver is bracketed by two artifact checks: an
//! installed artifact before the sequence means nothing runs, and a missing
//! artifact after it is fatal ([`MurubyError::BuildArtifactMissing`]).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::NativeLibrary;
use crate::core::MurubyError;
use crate::process::ToolCommand;
use crate::utils::progress::Reporter;

/// One step of a native build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Copy `include/*` into `include/SDL2/` so sources that include
    /// `<SDL2/SDL.h>` compile against the unpacked tree.
    StageHeaders,
    /// Run a program inside the source directory.
    Run {
        /// Program name or path
        program: String,
        /// Arguments
        args: Vec<String>,
    },
}

impl BuildStep {
    fn run<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Run {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// What [`NativeBuildDriver::build`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The sequence ran and the artifact is installed.
    Built,
    /// The artifact was already installed; nothing ran.
    Skipped,
}

/// Builds SDL2 libraries into a shared install prefix (`core/build_host`).
#[derive(Debug, Clone)]
pub struct NativeBuildDriver {
    prefix: PathBuf,
    make: String,
    reporter: Reporter,
}

impl NativeBuildDriver {
    /// Driver installing into `prefix`, running `make` as the build tool.
    pub fn new(prefix: impl Into<PathBuf>, make: impl Into<String>, reporter: Reporter) -> Self {
        Self {
            prefix: prefix.into(),
            make: make.into(),
            reporter,
        }
    }

    /// Install prefix shared by every library.
    #[must_use]
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Installed artifact proving `library` was built.
    #[must_use]
    pub fn artifact_path(&self, library: NativeLibrary) -> PathBuf {
        self.prefix.join("lib").join(library.artifact_name())
    }

    /// The fixed autotools sequence for `library` unpacked at `source_dir`.
    #[must_use]
    pub fn host_recipe(&self, library: NativeLibrary, source_dir: &Path) -> Vec<BuildStep> {
        let prefix = format!("--prefix={}", self.prefix.display());
        let configure = source_dir.join("configure").display().to_string();

        let mut steps = if library.is_extension() {
            vec![
                BuildStep::run(source_dir.join("autogen.sh").display().to_string(), Vec::<String>::new()),
                BuildStep::run(
                    configure,
                    [prefix, format!("--with-sdl-prefix={}", self.prefix.display())],
                ),
            ]
        } else {
            vec![BuildStep::StageHeaders, BuildStep::run(configure, [prefix])]
        };

        steps.push(BuildStep::run(&self.make, Vec::<String>::new()));
        steps.push(BuildStep::run(&self.make, ["install"]));
        if library.cleans_after_install() {
            steps.push(BuildStep::run(&self.make, ["clean"]));
        }
        steps
    }

    /// Build `library` from `source_dir` with its host recipe.
    pub async fn build(&self, library: NativeLibrary, source_dir: &Path) -> Result<BuildOutcome> {
        let steps = self.host_recipe(library, source_dir);
        self.build_with(library, source_dir, &steps).await
    }

    /// Run `steps` for `library` between the two artifact checks.
    pub async fn build_with(
        &self,
        library: NativeLibrary,
        source_dir: &Path,
        steps: &[BuildStep],
    ) -> Result<BuildOutcome> {
        self.reporter.step(format!("compiling {} for host", source_dir.display()));

        let artifact = self.artifact_path(library);
        if artifact.exists() {
            self.reporter.skip(format!("Skipping {library}..."));
            return Ok(BuildOutcome::Skipped);
        }

        for step in steps {
            match step {
                BuildStep::StageHeaders => stage_headers(source_dir).await?,
                BuildStep::Run {
                    program,
                    args,
                } => {
                    ToolCommand::new(program)
                        .args(args.iter().cloned())
                        .current_dir(source_dir)
                        .inherit_stdio()
                        .with_context(library.name())
                        .execute_success()
                        .await?;
                }
            }
        }

        if !artifact.exists() {
            return Err(MurubyError::BuildArtifactMissing {
                library: library.name().to_string(),
                source_dir: source_dir.to_path_buf(),
                artifact,
            }
            .into());
        }

        tracing::debug!("{} installed at {}", library, artifact.display());
        Ok(BuildOutcome::Built)
    }
}

/// Mirror `include/*` files into `include/SDL2/`, once.
async fn stage_headers(source_dir: &Path) -> Result<()> {
    let include = source_dir.join("include");
    let staged = include.join("SDL2");
    if staged.exists() {
        tracing::debug!("Headers already staged in {}", staged.display());
        return Ok(());
    }

    fs::create_dir_all(&staged)
        .await
        .with_context(|| format!("Failed to create {}", staged.display()))?;

    let mut entries = fs::read_dir(&include)
        .await
        .with_context(|| format!("Failed to read {}", include.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            let target = staged.join(entry.file_name());
            fs::copy(entry.path(), &target).await.with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}
