//! The `create` pipeline
//!
//! Strictly sequential: every step awaits its subprocesses before the next
//! one starts, and the first failure aborts the run. Nothing is rolled back;
//! running `create` again resumes, because fetches skip existing directories
//! and native builds skip installed artifacts.
//!
//! 1. Materialize `app/` from the skeleton.
//! 2. Fetch SDL2 and the enabled extensions into `core/`, then build them
//!    into `core/build_host`, base library first.
//! 3. Fetch mruby into `core/mruby` and check out the pinned reference.
//! 4. Insert the host gem sets into `build_config.rb` (release and debug).
//! 5. With Android: declare the cross build, generate the Android project
//!    and fetch the SDL ports into it ([`android`]).
//! 6. `rake clean` and `rake` inside mruby.

pub mod android;

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::build_config::{self, gems};
use crate::cache::Cache;
use crate::config::ScaffoldConfig;
use crate::constants::{
    BUILD_CONFIG_FILE, DEBUG_BUILD_ANCHOR, DEBUG_BUILD_TAG, HOST_BUILD_ANCHOR, HOST_BUILD_TAG,
};
use crate::core::MurubyError;
use crate::fetch::{FetchOutcome, Fetcher, FetcherKind};
use crate::native::{NativeBuildDriver, NativeLibrary};
use crate::process::ToolCommand;
use crate::utils::fs::ensure_dir;
use crate::utils::progress::Reporter;

/// One `create` run over a resolved [`ScaffoldConfig`].
pub struct Scaffold<'a> {
    config: &'a ScaffoldConfig,
    cache: Cache,
    reporter: Reporter,
}

impl<'a> Scaffold<'a> {
    /// Prepare a run; nothing touches the disk yet.
    #[must_use]
    pub fn new(config: &'a ScaffoldConfig) -> Self {
        Self {
            config,
            cache: Cache::with_dir(config.cache_dir.clone()),
            reporter: Reporter::new(config.quiet),
        }
    }

    /// Run every step.
    pub async fn run(&self) -> Result<()> {
        for program in self.required_tools()? {
            which::which(&program).map_err(|_| MurubyError::ToolNotFound {
                program: program.clone(),
            })?;
        }

        self.create_app()?;
        self.prepare_native().await?;
        self.prepare_runtime().await?;
        self.configure_runtime().await?;
        if let Some(target) = &self.config.android {
            android::configure(self, target).await?;
        }
        self.build_runtime().await?;

        self.reporter.success(format!(
            "Created {} in {}",
            self.config.app_name,
            self.config.project_root.display()
        ));
        Ok(())
    }

    /// Programs this run will start, given what already exists on disk.
    ///
    /// Also validates both fetcher tags, so a typo fails before any work.
    pub fn required_tools(&self) -> Result<BTreeSet<String>> {
        let config = self.config;
        let tools = &config.tools;
        let sdl_kind: FetcherKind = config.sources.sdl_fetcher.parse()?;
        let mruby_kind: FetcherKind = config.sources.mruby_fetcher.parse()?;

        let mut required = BTreeSet::new();
        let mut fetch_with = |kind: FetcherKind| match kind {
            FetcherKind::Archive => {
                required.insert(tools.curl.clone());
                required.insert(tools.tar.clone());
            }
            FetcherKind::Git => {
                required.insert(tools.git.clone());
            }
            FetcherKind::Mercurial => {
                required.insert(tools.hg.clone());
            }
        };

        let driver = self.native_driver();
        let mut needs_make = false;
        for library in config.libraries() {
            if !config.library_path(library).is_dir() {
                fetch_with(sdl_kind);
            }
            if config.android.is_some() && !config.android_library_path(library).is_dir() {
                fetch_with(sdl_kind);
            }
            needs_make |= !driver.artifact_path(library).exists();
        }
        if !config.mruby_path().is_dir() {
            fetch_with(mruby_kind);
        }

        match mruby_kind {
            FetcherKind::Git => {
                required.insert(tools.git.clone());
            }
            FetcherKind::Mercurial => {
                required.insert(tools.hg.clone());
            }
            FetcherKind::Archive => {}
        }
        if needs_make {
            required.insert(tools.make.clone());
        }
        required.insert(tools.rake.clone());
        Ok(required)
    }

    pub(crate) const fn config(&self) -> &ScaffoldConfig {
        self.config
    }

    pub(crate) const fn reporter(&self) -> Reporter {
        self.reporter
    }

    fn native_driver(&self) -> NativeBuildDriver {
        NativeBuildDriver::new(self.config.build_host_path(), &self.config.tools.make, self.reporter)
    }

    fn create_app(&self) -> Result<()> {
        let app = self.config.app_path();
        self.reporter.step(format!("creating {}", app.display()));
        self.config.skeleton.materialize_app(&app)
    }

    async fn prepare_native(&self) -> Result<()> {
        ensure_dir(&self.config.core_path())?;

        for library in self.config.libraries() {
            self.fetch_library(library, &self.config.library_path(library)).await?;
        }

        let driver = self.native_driver();
        for library in self.config.libraries() {
            driver.build(library, &self.config.library_path(library)).await?;
        }
        Ok(())
    }

    /// Fetch the sources of `library` into `destination` with the SDL fetcher.
    pub(crate) async fn fetch_library(
        &self,
        library: NativeLibrary,
        destination: &Path,
    ) -> Result<FetchOutcome> {
        let fetcher =
            Fetcher::from_tag(&self.config.sources.sdl_fetcher, self.cache.clone(), &self.config.tools)?;
        self.fetch(&fetcher, library.name(), destination, self.config.sources.library(library)).await
    }

    async fn fetch(
        &self,
        fetcher: &Fetcher,
        label: &str,
        destination: &Path,
        source: &str,
    ) -> Result<FetchOutcome> {
        self.reporter.step(format!("fetching {label} into {}", destination.display()));
        let outcome = fetcher.acquire(destination, source, &[]).await?;
        if outcome == FetchOutcome::AlreadyPresent {
            self.reporter.skip(format!("{label} already present"));
        }
        Ok(outcome)
    }

    async fn prepare_runtime(&self) -> Result<()> {
        let config = self.config;
        let fetcher =
            Fetcher::from_tag(&config.sources.mruby_fetcher, self.cache.clone(), &config.tools)?;
        let mruby = config.mruby_path();
        self.fetch(&fetcher, "mruby", &mruby, &config.sources.mruby).await?;

        self.reporter.step(format!("checking out mruby {}", config.runtime_ref));
        match fetcher.kind() {
            FetcherKind::Git => {
                ToolCommand::new(&config.tools.git)
                    .args(["checkout", config.runtime_ref.as_str()])
                    .current_dir(&mruby)
                    .execute_success()
                    .await
            }
            FetcherKind::Mercurial => {
                ToolCommand::new(&config.tools.hg)
                    .args(["update", config.runtime_ref.as_str()])
                    .current_dir(&mruby)
                    .execute_success()
                    .await
            }
            FetcherKind::Archive => {
                tracing::warn!("mruby fetched as an archive, not checking out {}", config.runtime_ref);
                Ok(())
            }
        }
    }

    pub(crate) fn build_config_path(&self) -> PathBuf {
        self.config.mruby_path().join(BUILD_CONFIG_FILE)
    }

    async fn configure_runtime(&self) -> Result<()> {
        let target = self.build_config_path();
        let host = gems::host_gems(&self.config.sdl2_gem, &self.config.build_host_path());

        self.reporter.step(format!("configuring {}", target.display()));
        build_config::generate_and_insert(&target, &host, HOST_BUILD_ANCHOR, HOST_BUILD_TAG).await?;
        build_config::generate_and_insert(&target, &host, DEBUG_BUILD_ANCHOR, DEBUG_BUILD_TAG).await
    }

    async fn build_runtime(&self) -> Result<()> {
        let mruby = self.config.mruby_path();
        self.reporter.step("building mruby");
        ToolCommand::new(&self.config.tools.rake)
            .arg("clean")
            .current_dir(&mruby)
            .inherit_stdio()
            .with_context("mruby")
            .execute_success()
            .await?;
        ToolCommand::new(&self.config.tools.rake)
            .current_dir(&mruby)
            .inherit_stdio()
            .with_context("mruby")
            .execute_success()
            .await
    }
}
