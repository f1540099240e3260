//! Snapshot workflow: publish time-limited public views of dashboards.

use std::path::Path;
use std::time::Duration;

use boardman_client::Client;
use boardman_core::config::Config;

use crate::error::SyncError;
use crate::store;

/// One published snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOutcome {
    pub uid: String,
    pub url: String,
}

/// Publish the named dashboards from `source`'s local store as time-limited
/// public snapshots on the `target` installation and return their URLs.
///
/// Datasource references are rewritten against the target's live catalog
/// first, so the snapshot renders with the target's datasources. Fails
/// fast on the first error.
pub fn snapshot_boards(
    config: &Config,
    dir: &Path,
    source: &str,
    target: &str,
    uids: &[String],
    expire: Duration,
) -> Result<Vec<SnapshotOutcome>, SyncError> {
    let source = config.input(source)?;
    let target = config.output(target)?;

    let client = Client::for_instance(target)?;
    let boards = store::instance_boards(dir, &source.name.0)?;
    let catalog = client.datasources()?;

    let mut outcomes = Vec::new();
    for uid in uids {
        let (_, board) = boards
            .iter()
            .find(|(_, board)| board.uid() == Some(uid.as_str()))
            .ok_or_else(|| SyncError::BoardNotFound { uid: uid.clone() })?;

        let mut outgoing = board.clone();
        let map = boardman_engine::resolve(&outgoing.datasources, &catalog);
        boardman_engine::rewrite(&mut outgoing.board, &map);

        let snapshot = client.snapshot(&outgoing.board, expire.as_secs())?;
        tracing::info!("snapshot of {uid} at {}", snapshot.url);
        outcomes.push(SnapshotOutcome {
            uid: uid.clone(),
            url: snapshot.url,
        });
    }
    Ok(outcomes)
}
