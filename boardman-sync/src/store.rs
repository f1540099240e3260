//! Local dashboard store.
//!
//! Layout: `<root>/<instance>/<folderUid>/<uid>.json`, one [`BoardFile`]
//! per dashboard; dashboards in the root folder collapse to
//! `<root>/<instance>/<uid>.json`. A per-instance SHA-256 ledger at
//! `<root>/.boardman/<instance>.json` gates writes, so a re-fetch of
//! unchanged dashboards touches nothing on disk.
//!
//! Writes are atomic: content goes to a `.tmp` sibling, then renames over
//! the final path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use boardman_core::types::BoardFile;

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<root>/<instance>/<folderUid>/<uid>.json`; the folder component is
/// omitted for root-folder dashboards.
pub fn board_path(root: &Path, instance: &str, folder_uid: &str, uid: &str) -> PathBuf {
    let mut dir = root.join(instance);
    if !folder_uid.is_empty() {
        dir = dir.join(folder_uid);
    }
    dir.join(format!("{uid}.json"))
}

/// `<root>/.boardman/<instance>.json` — pure, no I/O.
pub fn ledger_path(root: &Path, instance: &str) -> PathBuf {
    root.join(".boardman").join(format!("{instance}.json"))
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Parse one stored dashboard file.
pub fn load_board(path: &Path) -> Result<BoardFile, SyncError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|source| SyncError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Every stored dashboard of one instance, paired with its path, in
/// deterministic (sorted-path) order. A missing instance directory is a
/// storage error — fetch must have run first.
pub fn instance_boards(
    root: &Path,
    instance: &str,
) -> Result<Vec<(PathBuf, BoardFile)>, SyncError> {
    let dir = root.join(instance);
    let mut files = Vec::new();
    walk_into(&dir, &mut files)?;
    files
        .into_iter()
        .map(|path| load_board(&path).map(|board| (path, board)))
        .collect()
}

fn walk_into(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), SyncError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .collect::<Result<_, _>>()
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            walk_into(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write (hash-gated, atomic)
// ---------------------------------------------------------------------------

/// Outcome of an individual dashboard write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — content matches the ledger hash.
    Unchanged { path: PathBuf },
}

/// Per-instance fetch ledger: when the instance was last fetched, and the
/// content hash of every written file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    pub fetched_at: DateTime<Utc>,
    pub files: HashMap<String, String>,
}

impl Ledger {
    fn empty() -> Self {
        Self {
            fetched_at: Utc::now(),
            files: HashMap::new(),
        }
    }
}

/// Load the ledger for `instance`, empty if the file does not yet exist.
pub fn load_ledger(root: &Path, instance: &str) -> Result<Ledger, SyncError> {
    let path = ledger_path(root, instance);
    if !path.exists() {
        return Ok(Ledger::empty());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save the ledger for `instance` atomically.
pub fn save_ledger(root: &Path, instance: &str, ledger: &Ledger) -> Result<(), SyncError> {
    let path = ledger_path(root, instance);
    let Some(dir) = path.parent() else {
        return Err(io_err(path, std::io::Error::other("invalid ledger path")));
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

/// Write one dashboard file, gated on the ledger hash.
///
/// The ledger is updated in memory; the caller saves it after the whole
/// instance is processed.
pub(crate) fn write_board(
    path: &Path,
    board: &BoardFile,
    ledger: &mut HashMap<String, String>,
) -> Result<WriteResult, SyncError> {
    let mut content = serde_json::to_string_pretty(board)?;
    content.push('\n');

    let digest = {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    };

    let key = path.to_string_lossy().to_string();
    if ledger.get(&key) == Some(&digest) && path.exists() {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, &content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    ledger.insert(key, digest);
    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
