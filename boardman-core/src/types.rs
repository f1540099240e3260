//! Domain types shared across the boardman workspace.
//!
//! Dashboard bodies are schema-less [`serde_json::Value`] trees; the types
//! here are the stable metadata that travels next to a tree: datasource
//! descriptors, folder placement and the on-disk document format.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a configured installation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceName(pub String);

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for InstanceName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstanceName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A datasource descriptor as one installation knows it.
///
/// `uid` is opaque and installation-local; identity across installations is
/// the `(name, kind)` pair, never the uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Folder placement of a dashboard. Empty uid and title mean the root folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
}

/// One stored dashboard document: the body tree plus the datasource
/// descriptors recorded at fetch time and the folder it resided in.
///
/// This is exactly the on-disk JSON format of the local store:
/// `{ "board": …, "datasources": […], "folder": {…} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFile {
    pub board: Value,
    #[serde(default)]
    pub datasources: Vec<DataSource>,
    #[serde(default)]
    pub folder: FolderRef,
}

impl BoardFile {
    /// The document identity, if the tree carries one.
    pub fn uid(&self) -> Option<&str> {
        self.board.get("uid").and_then(Value::as_str)
    }

    /// Display title; empty when the tree carries none.
    pub fn title(&self) -> &str {
        self.board
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Display/filtering tags, verbatim (not sanitized).
    pub fn tags(&self) -> Vec<String> {
        match self.board.get("tags").and_then(Value::as_array) {
            Some(tags) => tags
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            None => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn board_file(board: Value) -> BoardFile {
        BoardFile {
            board,
            datasources: vec![],
            folder: FolderRef::default(),
        }
    }

    #[test]
    fn newtype_display() {
        assert_eq!(InstanceName::from("prod").to_string(), "prod");
    }

    #[test]
    fn newtype_equality() {
        let a = InstanceName::from("x");
        let b = InstanceName::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn accessors_read_the_tree() {
        let file = board_file(json!({
            "uid": "abc",
            "title": "Service overview",
            "tags": ["Prod", " staging "],
        }));
        assert_eq!(file.uid(), Some("abc"));
        assert_eq!(file.title(), "Service overview");
        assert_eq!(file.tags(), vec!["Prod".to_string(), " staging ".to_string()]);
    }

    #[test]
    fn accessors_tolerate_missing_fields() {
        let file = board_file(json!({"panels": []}));
        assert_eq!(file.uid(), None);
        assert_eq!(file.title(), "");
        assert!(file.tags().is_empty());
    }

    #[test]
    fn non_string_tags_are_skipped() {
        let file = board_file(json!({"tags": ["ok", 7, null]}));
        assert_eq!(file.tags(), vec!["ok".to_string()]);
    }

    #[test]
    fn board_file_serde_roundtrip() {
        let file = BoardFile {
            board: json!({"uid": "abc", "title": "T"}),
            datasources: vec![DataSource {
                uid: "ds1".into(),
                name: "influx1".into(),
                kind: "influxdb".into(),
            }],
            folder: FolderRef {
                uid: "f1".into(),
                title: "Ops".into(),
            },
        };
        let text = serde_json::to_string_pretty(&file).expect("serialize");
        assert!(text.contains("\"type\": \"influxdb\""), "wire key is `type`");
        let back: BoardFile = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, file);
    }

    #[test]
    fn board_file_defaults_for_missing_siblings() {
        let back: BoardFile =
            serde_json::from_str(r#"{"board": {"uid": "solo"}}"#).expect("deserialize");
        assert!(back.datasources.is_empty());
        assert_eq!(back.folder, FolderRef::default());
    }
}
