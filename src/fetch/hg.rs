//! Mercurial clones through a cache mirror.

use anyhow::Result;
use std::path::Path;

use super::{mirror_name, require_acquired};
use crate::cache::Cache;
use crate::process::ToolCommand;

/// Same two-hop layout as [`GitFetcher`](super::GitFetcher), with `hg`.
#[derive(Debug, Clone)]
pub struct HgFetcher {
    cache: Cache,
    hg: String,
}

impl HgFetcher {
    /// Fetcher running `hg`.
    pub fn new(cache: Cache, hg: impl Into<String>) -> Self {
        Self {
            cache,
            hg: hg.into(),
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
            ToolCommand::new(&self.hg)
                .arg("clone")
                .args(options.iter().cloned())
                .arg(url)
                .path_arg(&mirror)
                .execute_success()
                .await?;
        }

        ToolCommand::new(&self.hg)
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
            ToolCommand::new(&self.hg).args(["pull", "-R"]).path_arg(&mirror).execute_success().await?;
        }

        ToolCommand::new(&self.hg)
            .args(["pull", "-u", "-R"])
            .path_arg(destination)
            .execute_success()
            .await
    }
}
