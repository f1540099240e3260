//! `boardman upload` — push selected dashboards to an output installation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use boardman_core::config::Config;
use boardman_sync::{upload_boards, UploadOutcome};

/// Arguments for `boardman upload`.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Directory where the dashboards were fetched.
    #[arg(long, value_name = "DIR")]
    pub directory: PathBuf,

    /// Name of the input installation the dashboards came from.
    #[arg(long = "from", value_name = "NAME")]
    pub source: String,

    /// Name of the output installation to push to.
    #[arg(long = "to", value_name = "NAME")]
    pub target: String,

    /// Dashboard uids to upload.
    #[arg(required = true, value_name = "UID")]
    pub dashboards: Vec<String>,

    /// Show what would be pushed without pushing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl UploadArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let outcomes = upload_boards(
            config,
            &self.directory,
            &self.source,
            &self.target,
            &self.dashboards,
            self.dry_run,
        )
        .with_context(|| format!("upload to '{}' failed", self.target))?;

        for outcome in &outcomes {
            match outcome {
                UploadOutcome::Pushed { uid, folder } => {
                    println!("✓ pushed {uid}{}", folder_suffix(folder));
                }
                UploadOutcome::WouldPush { uid, folder } => {
                    println!("[dry-run] ~ would push {uid}{}", folder_suffix(folder));
                }
            }
        }
        Ok(())
    }
}

fn folder_suffix(folder: &Option<String>) -> String {
    match folder {
        Some(title) => format!(" → '{title}'"),
        None => String::new(),
    }
}
