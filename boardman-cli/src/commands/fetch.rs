//! `boardman fetch` — mirror input installations into the local store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use boardman_core::config::Config;
use boardman_sync::{fetch_all, WriteResult};

/// Arguments for `boardman fetch`.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Directory to fetch the dashboards into.
    #[arg(long, value_name = "DIR")]
    pub directory: PathBuf,
}

impl FetchArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let outcomes = fetch_all(config, &self.directory).context("fetch failed")?;

        if outcomes.is_empty() {
            println!("No input installations configured.");
            return Ok(());
        }

        for outcome in &outcomes {
            let written = outcome
                .writes
                .iter()
                .filter(|w| matches!(w, WriteResult::Written { .. }))
                .count();
            let unchanged = outcome.writes.len() - written;
            println!(
                "✓ '{}' fetched ({written} written, {unchanged} unchanged)",
                outcome.instance
            );
            for write in &outcome.writes {
                match write {
                    WriteResult::Written { path } => println!("  ✎  {}", path.display()),
                    WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
                }
            }
        }
        Ok(())
    }
}
