//! Compare workflow: classify local dashboards against target
//! installations.
//!
//! For every (local document, target installation) pair the pipeline is
//! scan → resolve → rewrite → normalize → diff: the local document's
//! datasource references are rewritten against the target's live catalog
//! before comparison, so a dashboard that differs only in opaque
//! datasource identifiers classifies as unchanged.

use std::path::Path;

use boardman_client::Client;
use boardman_core::config::Config;
use boardman_core::types::{BoardFile, FolderRef};

use crate::error::SyncError;
use crate::report::{self, BoardChange, ChangeAction, Report};
use crate::store;

/// Classify every local dashboard against every output installation and
/// persist the accumulated report at `report_path`.
///
/// Every output installation appears in the report, with an empty list
/// when nothing is new or drifting.
pub fn compare_all(
    config: &Config,
    dir: &Path,
    report_path: &Path,
) -> Result<Report, SyncError> {
    let mut report = Report::new();

    for target in &config.outputs {
        let changes = report.entry(target.name.to_string()).or_default();
        let client = Client::for_instance(target)?;
        let remote_summaries = client.search()?;
        let catalog = client.datasources()?;

        for source in &config.inputs {
            for (path, local) in store::instance_boards(dir, &source.name.0)? {
                let uid = local
                    .uid()
                    .ok_or(SyncError::MissingUid { path: path.clone() })?
                    .to_owned();
                if !target.includes(&local.tags()) {
                    tracing::debug!("skipping {uid}: no tag matches '{}'", target.name);
                    continue;
                }

                let mut candidate = local.clone();
                let map = boardman_engine::resolve(&candidate.datasources, &catalog);
                let referenced = boardman_engine::scan(&candidate.board);
                for unresolved in referenced.iter().filter(|r| map.get(r.as_str()).is_none()) {
                    tracing::debug!(
                        "{uid}: reference '{unresolved}' has no equivalent on '{}'",
                        target.name
                    );
                }
                boardman_engine::rewrite(&mut candidate.board, &map);

                let remote = if remote_summaries.iter().any(|s| s.uid == uid) {
                    let payload = client.board(&uid)?;
                    Some(BoardFile {
                        board: payload.dashboard,
                        datasources: vec![],
                        folder: FolderRef {
                            uid: payload.meta.folder_uid,
                            title: payload.meta.folder_title,
                        },
                    })
                } else {
                    None
                };

                if let Some(change) = classify_board(&source.name.0, &candidate, remote.as_ref())
                {
                    tracing::info!("dashboard {} is {}", change.uid, change.action);
                    changes.push(change);
                }
            }
        }
    }

    report::save(&report, report_path)?;
    Ok(report)
}

/// Pure classification of one (already rewritten) local dashboard against
/// its remote counterpart: `New` when the target has no document with the
/// same uid, `Modify` when the normalized documents differ, `None` for
/// unchanged documents — which are omitted from the report entirely.
pub(crate) fn classify_board(
    source: &str,
    local: &BoardFile,
    remote: Option<&BoardFile>,
) -> Option<BoardChange> {
    let uid = local.uid().unwrap_or_default().to_owned();
    let title = local.title().to_owned();
    let tags = boardman_engine::sanitize_tags(&local.tags());

    match remote {
        None => Some(BoardChange {
            source: source.to_owned(),
            uid,
            action: ChangeAction::New,
            title,
            tags,
            diff: None,
        }),
        Some(remote) => boardman_engine::compare(local, remote).map(|diff| BoardChange {
            source: source.to_owned(),
            uid,
            action: ChangeAction::Modify,
            title,
            tags,
            diff: Some(diff),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use boardman_core::types::FolderRef;
    use serde_json::json;

    use super::*;

    fn local_board() -> BoardFile {
        BoardFile {
            board: json!({
                "uid": "abc",
                "title": "T",
                "tags": ["Prod", " prod "],
            }),
            datasources: vec![],
            folder: FolderRef::default(),
        }
    }

    #[test]
    fn unknown_remote_classifies_as_new() {
        let change = classify_board("staging", &local_board(), None).expect("change");
        assert_eq!(change.action, ChangeAction::New);
        assert_eq!(change.source, "staging");
        assert_eq!(change.uid, "abc");
        assert_eq!(change.title, "T");
        assert_eq!(change.tags, vec!["prod", "prod"]);
        assert_eq!(change.diff, None);
    }

    #[test]
    fn drifted_remote_classifies_as_modify_with_diff() {
        let mut remote = local_board();
        remote.board["title"] = json!("renamed");
        let change = classify_board("staging", &local_board(), Some(&remote)).expect("change");
        assert_eq!(change.action, ChangeAction::Modify);
        assert!(change.diff.as_deref().is_some_and(|d| d.contains("@@")));
    }

    #[test]
    fn folder_drift_alone_classifies_as_modify() {
        let mut remote = local_board();
        remote.folder.title = "Archive".into();
        let change = classify_board("staging", &local_board(), Some(&remote)).expect("change");
        assert_eq!(change.action, ChangeAction::Modify);
        assert!(change.diff.as_deref().is_some_and(|d| d.contains("folder title")));
    }

    #[test]
    fn unchanged_remote_is_omitted() {
        let local = local_board();
        // Volatile fields differ; normalization cancels them out.
        let mut remote = local.clone();
        remote.board["id"] = json!(99);
        remote.board["version"] = json!(7);
        assert!(classify_board("staging", &local, Some(&remote)).is_none());
    }

    #[test]
    fn every_document_lands_in_exactly_one_bucket() {
        let local = local_board();
        let mut drifted = local.clone();
        drifted.board["title"] = json!("renamed");

        let cases: Vec<(Option<&BoardFile>, Option<ChangeAction>)> = vec![
            (None, Some(ChangeAction::New)),
            (Some(&local), None),
            (Some(&drifted), Some(ChangeAction::Modify)),
        ];
        for (remote, expected) in cases {
            let got = classify_board("staging", &local, remote).map(|c| c.action);
            assert_eq!(got, expected);
        }
    }
}
