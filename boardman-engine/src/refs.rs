//! Datasource reference scanning and rewriting.
//!
//! Dashboards embed datasource references as objects of the form
//! `{"datasource": {"uid": "…", …}}` at arbitrary depth: panels, templating
//! variables, annotations, nested panel groups. Neither pass assumes
//! anything about the surrounding shape — the tree is walked exhaustively,
//! so new document structures introduced upstream need no change here.
//!
//! The node-matching rule lives in `reference_uid` and is shared by the
//! collection pass ([`scan`]) and the transformation pass ([`rewrite`]);
//! what the scanner can see and what the rewriter can change is the same
//! set of nodes.

use std::collections::HashSet;

use serde_json::Value;

use crate::equiv::EquivalenceMap;

/// Built-in pseudo-datasources ("-- Mixed --", "-- Dashboard --", …) carry
/// this prefix. They are installation-independent and are never reported
/// nor remapped.
pub const RESERVED_PREFIX: &str = "-- ";

/// Key that marks a reference object.
const REFERENCE_KEY: &str = "datasource";
/// Identifier field inside a reference object.
const UID_FIELD: &str = "uid";

/// Whether `uid` denotes a built-in pseudo-datasource.
pub fn is_reserved(uid: &str) -> bool {
    uid.starts_with(RESERVED_PREFIX)
}

/// The single node-matching rule: an object value sitting under a
/// `"datasource"` key counts as a reference iff it carries a string
/// `"uid"`. A marker object without a uid, or with a non-string uid, is
/// not an error — it is simply not a reference.
fn reference_uid<'a>(key: &str, value: &'a Value) -> Option<&'a str> {
    if key != REFERENCE_KEY {
        return None;
    }
    value.as_object()?.get(UID_FIELD)?.as_str()
}

/// Collect every datasource uid referenced by `tree`: first-seen order,
/// de-duplicated, reserved identifiers excluded.
pub fn scan(tree: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    collect(tree, &mut seen, &mut found);
    found
}

fn collect(value: &Value, seen: &mut HashSet<String>, found: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect(item, seen, found);
            }
        }
        Value::Object(fields) => {
            for (key, inner) in fields {
                collect(inner, seen, found);
                if let Some(uid) = reference_uid(key, inner) {
                    if !is_reserved(uid) && seen.insert(uid.to_owned()) {
                        found.push(uid.to_owned());
                    }
                }
            }
        }
        _ => {}
    }
}

/// Rewrite every datasource reference in `tree` through `map`, in place.
///
/// Descends exactly like [`scan`]. Reserved identifiers are untouched;
/// identifiers absent from the map are left as-is — a silent pass-through,
/// the resulting document will reference a datasource the target does not
/// have. Structure, keys and every non-reference value are preserved, and
/// re-running with the same map is a no-op.
pub fn rewrite(tree: &mut Value, map: &EquivalenceMap) {
    match tree {
        Value::Array(items) => {
            for item in items {
                rewrite(item, map);
            }
        }
        Value::Object(fields) => {
            for (key, inner) in fields.iter_mut() {
                rewrite(inner, map);
                let remapped = reference_uid(key, inner)
                    .filter(|uid| !is_reserved(uid))
                    .and_then(|uid| map.get(uid))
                    .map(str::to_owned);
                if let (Some(uid), Some(marker)) = (remapped, inner.as_object_mut()) {
                    marker.insert(UID_FIELD.to_owned(), Value::String(uid));
                }
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(entries: &[(&str, &str)]) -> EquivalenceMap {
        let mut m = EquivalenceMap::new();
        for (from, to) in entries {
            m.insert(*from, *to);
        }
        m
    }

    #[test]
    fn scan_finds_references_at_any_depth() {
        let tree = json!({
            "panels": [
                {"datasource": {"uid": "a"}},
                {"rows": [{"panels": [{"datasource": {"uid": "b"}}]}]},
            ],
            "templating": {"list": [{"datasource": {"uid": "c"}}]},
            "annotations": {"list": [{"datasource": {"uid": "a"}}]},
        });
        assert_eq!(scan(&tree), vec!["a", "b", "c"]);
    }

    #[test]
    fn scan_is_first_seen_order_deduplicated() {
        let tree = json!([
            {"datasource": {"uid": "z"}},
            {"datasource": {"uid": "a"}},
            {"datasource": {"uid": "z"}},
        ]);
        assert_eq!(scan(&tree), vec!["z", "a"]);
    }

    #[test]
    fn scan_never_reports_reserved() {
        let tree = json!({
            "panels": [
                {"datasource": {"uid": "-- Mixed --"}},
                {"datasource": {"uid": "real"}},
                {"datasource": {"uid": "-- Dashboard --"}},
            ],
        });
        assert_eq!(scan(&tree), vec!["real"]);
    }

    #[test]
    fn scan_skips_marker_without_uid() {
        let tree = json!({"datasource": {"type": "influxdb"}});
        assert!(scan(&tree).is_empty());
    }

    #[test]
    fn scan_skips_non_string_uid() {
        let tree = json!({"datasource": {"uid": 42}});
        assert!(scan(&tree).is_empty());
    }

    #[test]
    fn scan_ignores_plain_datasource_strings() {
        // Legacy shape: `"datasource": "name"` is not a reference object.
        let tree = json!({"panels": [{"datasource": "by-name"}]});
        assert!(scan(&tree).is_empty());
    }

    #[test]
    fn rewrite_remaps_only_mapped_uids() {
        let mut tree = json!({
            "panels": [
                {"datasource": {"uid": "a", "type": "influxdb"}},
                {"datasource": {"uid": "unknown"}},
            ],
        });
        rewrite(&mut tree, &map(&[("a", "A")]));
        assert_eq!(tree["panels"][0]["datasource"]["uid"], "A");
        assert_eq!(tree["panels"][0]["datasource"]["type"], "influxdb");
        // Unmapped references pass through silently.
        assert_eq!(tree["panels"][1]["datasource"]["uid"], "unknown");
    }

    #[test]
    fn rewrite_never_touches_reserved() {
        let mut tree = json!({"datasource": {"uid": "-- Mixed --"}});
        rewrite(&mut tree, &map(&[("-- Mixed --", "oops")]));
        assert_eq!(tree["datasource"]["uid"], "-- Mixed --");
    }

    #[test]
    fn rewrite_is_idempotent() {
        let mut tree = json!({
            "panels": [{"datasource": {"uid": "a"}}],
            "templating": {"list": [{"datasource": {"uid": "b"}}]},
        });
        let m = map(&[("a", "A"), ("b", "B")]);
        rewrite(&mut tree, &m);
        let once = tree.clone();
        rewrite(&mut tree, &m);
        assert_eq!(tree, once);
    }

    #[test]
    fn rewrite_preserves_structure() {
        let mut tree = json!({
            "uid": "board",
            "panels": [
                {"id": 1, "datasource": {"uid": "a"}, "targets": [{"expr": "up"}]},
            ],
        });
        let before_refs = scan(&tree).len();
        rewrite(&mut tree, &map(&[("a", "A")]));
        assert_eq!(scan(&tree).len(), before_refs);
        assert_eq!(tree["uid"], "board");
        assert_eq!(tree["panels"][0]["id"], 1);
        assert_eq!(tree["panels"][0]["targets"][0]["expr"], "up");
    }

    #[test]
    fn scalars_are_untouched() {
        let mut tree = json!("just a string");
        rewrite(&mut tree, &map(&[("a", "A")]));
        assert_eq!(tree, json!("just a string"));
        assert!(scan(&tree).is_empty());
    }
}
