//! Comparison-canonical form of a dashboard tree.

use serde_json::{json, Value};

/// Reset the volatile, installation-bound fields of a dashboard tree to
/// fixed baselines: the internal numeric `id` → 0, the URL `slug` → "",
/// the `version` counter → 1. The baseline is written even when a field is
/// absent, so presence of a volatile field on one side cannot show up as a
/// structural difference. Non-object trees are returned unchanged.
///
/// The result is used only for comparison and is never persisted.
pub fn normalize(mut board: Value) -> Value {
    if let Some(fields) = board.as_object_mut() {
        fields.insert("id".to_owned(), json!(0));
        fields.insert("slug".to_owned(), json!(""));
        fields.insert("version".to_owned(), json!(1));
    }
    board
}

/// Canonical display form of a tag list: surrounding whitespace trimmed,
/// lower-cased. Independent of tree normalization.
pub fn sanitize_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|tag| tag.trim().to_lowercase()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
