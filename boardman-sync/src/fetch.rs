//! Fetch workflow: mirror every input installation into the local store.

use std::path::Path;

use boardman_client::Client;
use boardman_core::config::Config;
use boardman_core::types::{BoardFile, FolderRef};
use chrono::Utc;

use crate::error::{io_err, SyncError};
use crate::store::{self, WriteResult};

/// Per-instance fetch outcome, for CLI reporting.
#[derive(Debug)]
pub struct FetchOutcome {
    pub instance: String,
    pub writes: Vec<WriteResult>,
}

/// Fetch every dashboard of every input installation into `dir`.
///
/// For each dashboard the body tree is stored together with the folder it
/// resided in and the descriptors of the datasources it references — the
/// referenced subset of the installation's catalog at fetch time. Writes
/// are hash-gated, so unchanged dashboards are not rewritten.
pub fn fetch_all(config: &Config, dir: &Path) -> Result<Vec<FetchOutcome>, SyncError> {
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let mut outcomes = Vec::new();
    for instance in &config.inputs {
        let client = Client::for_instance(instance)?;
        let catalog = client.datasources()?;
        let mut ledger = store::load_ledger(dir, &instance.name.0)?;
        let mut writes = Vec::new();

        for summary in client.search()? {
            let payload = client.board(&summary.uid)?;
            let referenced = boardman_engine::scan(&payload.dashboard);
            let datasources = catalog
                .iter()
                .filter(|descriptor| referenced.iter().any(|uid| *uid == descriptor.uid))
                .cloned()
                .collect();

            let file = BoardFile {
                board: payload.dashboard,
                datasources,
                folder: FolderRef {
                    uid: payload.meta.folder_uid,
                    title: payload.meta.folder_title,
                },
            };
            let path = store::board_path(dir, &instance.name.0, &file.folder.uid, &summary.uid);
            tracing::debug!("fetched {} from '{}'", summary.uid, instance.name);
            writes.push(store::write_board(&path, &file, &mut ledger.files)?);
        }

        ledger.fetched_at = Utc::now();
        store::save_ledger(dir, &instance.name.0, &ledger)?;
        outcomes.push(FetchOutcome {
            instance: instance.name.to_string(),
            writes,
        });
    }
    Ok(outcomes)
}
