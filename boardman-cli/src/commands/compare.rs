//! `boardman compare` — classify local dashboards against output
//! installations and write the JSON report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use boardman_core::config::Config;
use boardman_sync::{compare_all, ChangeAction, Report};

/// Arguments for `boardman compare`.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Directory where the dashboards were fetched.
    #[arg(long, value_name = "DIR")]
    pub directory: PathBuf,

    /// File to write the JSON report to.
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,
}

#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "action")]
    action: String,
    #[tabled(rename = "source")]
    source: String,
    #[tabled(rename = "uid")]
    uid: String,
    #[tabled(rename = "title")]
    title: String,
}

impl CompareArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let report = compare_all(config, &self.directory, &self.report)
            .context("compare failed")?;

        print_summary(&report);
        println!("Report written to {}.", self.report.display());
        Ok(())
    }
}

fn print_summary(report: &Report) {
    if report.is_empty() {
        println!("No output installations configured.");
        return;
    }

    for (target, changes) in report {
        if changes.is_empty() {
            println!("✓ '{target}' — up to date");
            continue;
        }

        let new = changes
            .iter()
            .filter(|c| c.action == ChangeAction::New)
            .count();
        let modified = changes.len() - new;
        println!(
            "'{target}' — {} new, {} modified",
            new.to_string().green().bold(),
            modified.to_string().yellow().bold(),
        );

        let rows: Vec<ChangeRow> = changes
            .iter()
            .map(|change| ChangeRow {
                action: match change.action {
                    ChangeAction::New => change.action.to_string().green().to_string(),
                    ChangeAction::Modify => change.action.to_string().yellow().to_string(),
                },
                source: change.source.clone(),
                uid: change.uid.clone(),
                title: change.title.clone(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }
}
