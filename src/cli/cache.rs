//! `muruby cache`

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::cache::Cache;
use crate::config::GlobalConfig;

/// Inspect or clean the local cache.
#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
enum CacheSubcommand {
    /// Print the cache location.
    Path,
    /// List cached archives and mirrors with their sizes.
    List,
    /// Delete the whole cache.
    Clean,
}

impl CacheCommand {
    /// Run the subcommand against the configured cache.
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let cache = Cache::new(global)?;
        match self.command {
            CacheSubcommand::Path => {
                println!("{}", cache.cache_dir().display());
                Ok(())
            }
            CacheSubcommand::List => list(&cache).await,
            CacheSubcommand::Clean => {
                let size = cache.size().await?;
                cache.clear_all().await?;
                println!(
                    "{} Removed {} from {}",
                    "✓".green().bold(),
                    format_size(size),
                    cache.cache_dir().display()
                );
                Ok(())
            }
        }
    }
}

async fn list(cache: &Cache) -> Result<()> {
    let entries = cache.list_entries().await?;
    if entries.is_empty() {
        println!("Cache is empty ({})", cache.cache_dir().display());
        return Ok(());
    }

    println!("{}", cache.cache_dir().display().to_string().bold());
    let mut total = 0;
    for entry in &entries {
        total += entry.size;
        let kind = if entry.is_dir {
            "mirror"
        } else {
            "archive"
        };
        println!("  {:<40} {:<8} {:>10}", entry.name, kind.dimmed(), format_size(entry.size));
    }
    println!("  {:<40} {:<8} {:>10}", "total".bold(), "", format_size(total));
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    match bytes {
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{:.1} KB", b as f64 / KB as f64),
        b if b < GB => format!("{:.1} MB", b as f64 / MB as f64),
        b => format!("{:.1} GB", b as f64 / GB as f64),
    }
}
