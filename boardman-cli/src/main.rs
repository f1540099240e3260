//! boardman — cross-installation dashboard sync CLI.
//!
//! # Usage
//!
//! ```text
//! boardman -c config.yaml fetch --directory ./dashboards
//! boardman -c config.yaml compare --directory ./dashboards --report report.json
//! boardman -c config.yaml upload --directory ./dashboards --from staging --to prod <uid>…
//! boardman -c config.yaml snapshot --directory ./dashboards --from staging --to prod --expire 2h <uid>…
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use boardman_core::config::Config;
use commands::{
    compare::CompareArgs, fetch::FetchArgs, snapshot::SnapshotArgs, upload::UploadArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "boardman",
    version,
    about = "Synchronize dashboards across installations",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short = 'c', long, value_name = "FILE")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch dashboards from every input installation into a local directory.
    Fetch(FetchArgs),

    /// Classify local dashboards against every output installation and write a report.
    Compare(CompareArgs),

    /// Push selected dashboards to an output installation.
    Upload(UploadArgs),

    /// Publish time-limited public snapshots of selected dashboards.
    Snapshot(SnapshotArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Fetch(args) => args.run(&config),
        Commands::Compare(args) => args.run(&config),
        Commands::Upload(args) => args.run(&config),
        Commands::Snapshot(args) => args.run(&config),
    }
}
