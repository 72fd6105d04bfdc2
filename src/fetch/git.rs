//! git clones through a cache mirror.

use anyhow::Result;
use std::path::Path;

use super::{mirror_name, require_acquired};
use crate::cache::Cache;
use crate::process::ToolCommand;

/// Clones a repository into `<cache>/<basename(destination)>` once, then
/// clones that mirror into each destination.
///
/// The destination's `origin` is the mirror, so later projects and updates
/// are served from local disk.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    cache: Cache,
    git: String,
}

impl GitFetcher {
    /// Fetcher running `git`.
    pub fn new(cache: Cache, git: impl Into<String>) -> Self {
        Self {
            cache,
            git: git.into(),
        }
    }

    pub(super) const fn cache(&self) -> &Cache {
        &self.cache
    }

    pub(super) async fn fetch(&self, destination: &Path, url: &str, options: &[String]) -> Result<()> {
        let mirror = self.cache.entry_path(&mirror_name(destination)?);

        if mirror.exists() {
            tracing::debug!(target: "fetch", "Reusing mirror {}", mirror.display());
        } else {
            ToolCommand::new(&self.git)
                .arg("clone")
                .args(options.iter().cloned())
                .arg(url)
                .path_arg(&mirror)
                .execute_success()
                .await?;
        }

        ToolCommand::new(&self.git)
            .arg("clone")
            .args(options.iter().cloned())
            .path_arg(&mirror)
            .path_arg(destination)
            .execute_success()
            .await
    }

    pub(super) async fn update(&self, destination: &Path) -> Result<()> {
        require_acquired(destination)?;
        let mirror = self.cache.entry_path(&mirror_name(destination)?);

        if mirror.is_dir() {
            ToolCommand::new(&self.git).arg("pull").current_dir(&mirror).execute_success().await?;
        } else {
            tracing::warn!(
                target: "fetch",
                "Mirror {} is gone, updating {} from its origin only",
                mirror.display(),
                destination.display()
            );
        }

        // The destination may sit on a detached tag, so fetch instead of pull.
        ToolCommand::new(&self.git)
            .args(["fetch", "--tags", "origin"])
            .current_dir(destination)
            .execute_success()
            .await
    }
}
