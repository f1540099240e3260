//! Structural comparison of normalized dashboards.

use serde_json::Value;
use similar::TextDiff;

use boardman_core::types::BoardFile;

use crate::normalize::normalize;

/// Compare two dashboards in comparison-canonical form.
///
/// Returns `None` when the normalized trees are structurally equal (same
/// key set with pairwise-equal values for objects, positionally-equal
/// elements for sequences, exact scalar match — no numeric tolerance) AND
/// the folder titles match. Otherwise returns a human-readable unified
/// diff of the pretty-printed normalized trees, with a trailing
/// folder-title line when the folders contributed to the inequality.
pub fn compare(local: &BoardFile, remote: &BoardFile) -> Option<String> {
    let ours = normalize(local.board.clone());
    let theirs = normalize(remote.board.clone());
    let trees_equal = ours == theirs;
    let folders_equal = local.folder.title == remote.folder.title;
    if trees_equal && folders_equal {
        return None;
    }

    let mut text = String::new();
    if !trees_equal {
        let left = pretty(&ours);
        let right = pretty(&theirs);
        text.push_str(
            &TextDiff::from_lines(&left, &right)
                .unified_diff()
                .header("local", "remote")
                .context_radius(3)
                .to_string(),
        );
    }
    if !folders_equal {
        text.push_str(&format!(
            "folder title: local '{}' != remote '{}'\n",
            local.folder.title, remote.folder.title
        ));
    }
    Some(text)
}

fn pretty(tree: &Value) -> String {
    let mut text = serde_json::to_string_pretty(tree).unwrap_or_default();
    text.push('\n');
    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
