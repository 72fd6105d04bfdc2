//! Source acquisition through the local cache
//!
//! A [`Fetcher`] resolves a remote source into a local directory. Every
//! variant goes through the [`Cache`]: archives are downloaded into it before
//! being unpacked, repositories are cloned into a mirror there and then cloned
//! again from the mirror into the project.
//!
//! Fetching is idempotent at directory granularity: when the destination
//! directory exists, [`Fetcher::acquire`] returns
//! [`FetchOutcome::AlreadyPresent`] without starting any process. A
//! destination left half-populated by an interrupted fetch is therefore
//! treated as complete; delete it to fetch again.

mod archive;
mod git;
mod hg;

pub use archive::{ArchiveFetcher, archive_file_name, archive_stem};
pub use git::GitFetcher;
pub use hg::HgFetcher;

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::cache::Cache;
use crate::config::ToolTable;
use crate::core::MurubyError;
use crate::utils::fs::ensure_dir;

/// Acquisition strategy, parsed from the fetcher tags of the user config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    /// `curl` download plus `tar` extraction
    Archive,
    /// git clone through a mirror
    Git,
    /// Mercurial clone through a mirror
    Mercurial,
}

impl FromStr for FetcherKind {
    type Err = MurubyError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "curl" | "archive" => Ok(Self::Archive),
            "git" => Ok(Self::Git),
            "hg" | "mercurial" => Ok(Self::Mercurial),
            _ => Err(MurubyError::InvalidFetcher {
                tag: tag.to_string(),
            }),
        }
    }
}

impl fmt::Display for FetcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Archive => "curl",
            Self::Git => "git",
            Self::Mercurial => "hg",
        })
    }
}

/// Result of [`Fetcher::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination was populated by this call.
    Fetched,
    /// The destination already existed; nothing ran.
    AlreadyPresent,
}

/// A configured acquisition strategy.
#[derive(Debug, Clone)]
pub enum Fetcher {
    /// See [`ArchiveFetcher`]
    Archive(ArchiveFetcher),
    /// See [`GitFetcher`]
    Git(GitFetcher),
    /// See [`HgFetcher`]
    Mercurial(HgFetcher),
}

impl Fetcher {
    /// Fetcher of `kind` using `cache` and the programs named in `tools`.
    #[must_use]
    pub fn new(kind: FetcherKind, cache: Cache, tools: &ToolTable) -> Self {
        match kind {
            FetcherKind::Archive => Self::Archive(ArchiveFetcher::new(cache, &tools.curl, &tools.tar)),
            FetcherKind::Git => Self::Git(GitFetcher::new(cache, &tools.git)),
            FetcherKind::Mercurial => Self::Mercurial(HgFetcher::new(cache, &tools.hg)),
        }
    }

    /// Fetcher for a config tag such as `"curl"` or `"git"`.
    ///
    /// # Errors
    ///
    /// [`MurubyError::InvalidFetcher`] for an unknown tag.
    pub fn from_tag(tag: &str, cache: Cache, tools: &ToolTable) -> Result<Self> {
        Ok(Self::new(tag.parse()?, cache, tools))
    }

    /// Strategy of this fetcher.
    #[must_use]
    pub const fn kind(&self) -> FetcherKind {
        match self {
            Self::Archive(_) => FetcherKind::Archive,
            Self::Git(_) => FetcherKind::Git,
            Self::Mercurial(_) => FetcherKind::Mercurial,
        }
    }

    fn cache(&self) -> &Cache {
        match self {
            Self::Archive(f) => f.cache(),
            Self::Git(f) => f.cache(),
            Self::Mercurial(f) => f.cache(),
        }
    }

    /// Populate `destination` from `source`, unless it already exists.
    ///
    /// `options` are passed through to the underlying download or clone
    /// command unchanged.
    pub async fn acquire(
        &self,
        destination: &Path,
        source: &str,
        options: &[String],
    ) -> Result<FetchOutcome> {
        if destination.is_dir() {
            tracing::debug!(
                target: "fetch",
                "{} already present, not fetching",
                destination.display()
            );
            return Ok(FetchOutcome::AlreadyPresent);
        }

        self.cache().ensure_cache_dir().await?;
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }

        tracing::debug!(
            target: "fetch",
            "Fetching {} into {} ({})",
            source,
            destination.display(),
            self.kind()
        );
        match self {
            Self::Archive(f) => f.fetch(destination, source, options).await?,
            Self::Git(f) => f.fetch(destination, source, options).await?,
            Self::Mercurial(f) => f.fetch(destination, source, options).await?,
        }
        Ok(FetchOutcome::Fetched)
    }

    /// Refresh a previously acquired `destination`.
    ///
    /// Repositories refresh their cache mirror from upstream, then pull the
    /// destination from the mirror. Archives are immutable; this is a no-op.
    pub async fn update(&self, destination: &Path) -> Result<()> {
        match self {
            Self::Archive(_) => {
                tracing::debug!(target: "fetch", "Archives are not updated");
                Ok(())
            }
            Self::Git(f) => f.update(destination).await,
            Self::Mercurial(f) => f.update(destination).await,
        }
    }
}

/// Cache key of the mirror feeding `destination`: its basename.
fn mirror_name(destination: &Path) -> Result<String> {
    destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            MurubyError::Other {
                message: format!("Cannot derive a cache name from {}", destination.display()),
            }
            .into()
        })
}

/// Fails unless `destination` was acquired before.
fn require_acquired(destination: &Path) -> Result<()> {
    if destination.is_dir() {
        Ok(())
    } else {
        Err(MurubyError::Other {
            message: format!("{} has not been fetched yet", destination.display()),
        }
        .into())
    }
}
