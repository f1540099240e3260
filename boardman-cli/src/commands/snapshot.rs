//! `boardman snapshot` — publish time-limited public dashboard snapshots.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use boardman_core::config::Config;
use boardman_sync::snapshot_boards;

/// Thin wrapper so clap can parse human-friendly durations: `45s`, `15m`,
/// `2h`, `1d`, or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpireArg(pub Duration);

impl FromStr for ExpireArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |digits: &str, scale: u64| {
            digits
                .parse::<u64>()
                .map(|n| ExpireArg(Duration::from_secs(n * scale)))
                .map_err(|_| format!("invalid duration '{s}'; expected forms: 45s, 15m, 2h, 1d"))
        };
        match s.char_indices().last() {
            Some((idx, 's')) => parse(&s[..idx], 1),
            Some((idx, 'm')) => parse(&s[..idx], 60),
            Some((idx, 'h')) => parse(&s[..idx], 3600),
            Some((idx, 'd')) => parse(&s[..idx], 86400),
            _ => parse(s, 1),
        }
    }
}

impl fmt::Display for ExpireArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0.as_secs())
    }
}

/// Arguments for `boardman snapshot`.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Directory where the dashboards were fetched.
    #[arg(long, value_name = "DIR")]
    pub directory: PathBuf,

    /// Name of the input installation the dashboards came from.
    #[arg(long = "from", value_name = "NAME")]
    pub source: String,

    /// Name of the output installation to snapshot on.
    #[arg(long = "to", value_name = "NAME")]
    pub target: String,

    /// Dashboard uids to snapshot.
    #[arg(required = true, value_name = "UID")]
    pub dashboards: Vec<String>,

    /// Snapshot expiration time.
    #[arg(long, default_value = "1h", value_name = "DURATION")]
    pub expire: ExpireArg,
}

impl SnapshotArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let outcomes = snapshot_boards(
            config,
            &self.directory,
            &self.source,
            &self.target,
            &self.dashboards,
            self.expire.0,
        )
        .with_context(|| format!("snapshot on '{}' failed", self.target))?;

        for outcome in &outcomes {
            println!("{}", outcome.url);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_durations() {
        assert_eq!("45s".parse(), Ok(ExpireArg(Duration::from_secs(45))));
        assert_eq!("15m".parse(), Ok(ExpireArg(Duration::from_secs(900))));
        assert_eq!("2h".parse(), Ok(ExpireArg(Duration::from_secs(7200))));
        assert_eq!("1d".parse(), Ok(ExpireArg(Duration::from_secs(86400))));
    }

    #[test]
    fn bare_number_means_seconds() {
        assert_eq!("90".parse(), Ok(ExpireArg(Duration::from_secs(90))));
    }

    #[test]
    fn rejects_garbage() {
        assert!("soon".parse::<ExpireArg>().is_err());
        assert!("".parse::<ExpireArg>().is_err());
        assert!("h".parse::<ExpireArg>().is_err());
    }
}
