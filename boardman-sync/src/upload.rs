//! Upload workflow: push named dashboards to a target installation.

use std::path::Path;

use boardman_client::Client;
use boardman_core::config::Config;
use serde_json::Value;

use crate::error::SyncError;
use crate::store;

/// Outcome of one requested upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The dashboard was pushed, placed in the named folder (root when `None`).
    Pushed { uid: String, folder: Option<String> },
    /// `--dry-run` mode: the dashboard *would* have been pushed.
    WouldPush { uid: String, folder: Option<String> },
}

/// Push the named dashboards from `source`'s local store to the `target`
/// installation.
///
/// Folder placement is resolved by title on the target — the folder is
/// created when no title match exists. Datasource references are rewritten
/// against the target's live catalog and the installation-local numeric id
/// is cleared before pushing with overwrite semantics. Fails fast: the
/// first error aborts the remaining uids.
pub fn upload_boards(
    config: &Config,
    dir: &Path,
    source: &str,
    target: &str,
    uids: &[String],
    dry_run: bool,
) -> Result<Vec<UploadOutcome>, SyncError> {
    let source = config.input(source)?;
    let target = config.output(target)?;

    let client = Client::for_instance(target)?;
    let boards = store::instance_boards(dir, &source.name.0)?;
    let catalog = client.datasources()?;
    let mut folders = client.folders()?;

    let mut outcomes = Vec::new();
    for uid in uids {
        let (_, board) = boards
            .iter()
            .find(|(_, board)| board.uid() == Some(uid.as_str()))
            .ok_or_else(|| SyncError::BoardNotFound { uid: uid.clone() })?;

        let mut outgoing = board.clone();
        let map = boardman_engine::resolve(&outgoing.datasources, &catalog);
        boardman_engine::rewrite(&mut outgoing.board, &map);

        let folder_title = (!outgoing.folder.title.is_empty()).then(|| outgoing.folder.title.clone());
        if dry_run {
            tracing::info!("[dry-run] would push {uid} to '{}'", target.name);
            outcomes.push(UploadOutcome::WouldPush {
                uid: uid.clone(),
                folder: folder_title,
            });
            continue;
        }

        let folder_uid = match &folder_title {
            Some(title) => Some(folder_uid_by_title(&client, &mut folders, title)?),
            None => None,
        };

        // The stored id is local to the source installation; the target
        // assigns its own on create.
        if let Some(fields) = outgoing.board.as_object_mut() {
            fields.insert("id".to_owned(), Value::Null);
        }

        client.set_board(&outgoing.board, folder_uid.as_deref(), true)?;
        tracing::info!("pushed {uid} to '{}'", target.name);
        outcomes.push(UploadOutcome::Pushed {
            uid: uid.clone(),
            folder: folder_title,
        });
    }
    Ok(outcomes)
}

/// Find the target folder by title, creating it when absent. Newly created
/// folders are appended to the cached list so later uids reuse them.
fn folder_uid_by_title(
    client: &Client,
    folders: &mut Vec<boardman_client::Folder>,
    title: &str,
) -> Result<String, SyncError> {
    if let Some(folder) = folders.iter().find(|folder| folder.title == title) {
        return Ok(folder.uid.clone());
    }
    let created = client.create_folder(title)?;
    tracing::info!("created folder '{title}'");
    let uid = created.uid.clone();
    folders.push(created);
    Ok(uid)
}
