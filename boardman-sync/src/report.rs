//! Compare report: what each target installation is missing or drifting on.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, SyncError};

/// What the compare workflow decided for one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// The target installation does not have the dashboard at all.
    New,
    /// The target has it, but the normalized documents differ.
    Modify,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAction::New => write!(f, "new"),
            ChangeAction::Modify => write!(f, "modify"),
        }
    }
}

/// One report record. Unchanged dashboards are never recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardChange {
    /// Input installation the dashboard came from.
    pub source: String,
    pub uid: String,
    pub action: ChangeAction,
    pub title: String,
    /// Sanitized (trimmed, lower-cased) display tags.
    pub tags: Vec<String>,
    /// Unified diff of the normalized documents; only for `modify`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Target installation name → its accumulated changes. `BTreeMap` keeps the
/// serialized key order deterministic.
pub type Report = BTreeMap<String, Vec<BoardChange>>;

/// Serialize the report as indented JSON, atomically (tmp + rename).
pub fn save(report: &Report, path: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');

    let tmp = path.with_file_name(format!(
        "{}.tmp",
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.json".to_owned())
    ));
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
