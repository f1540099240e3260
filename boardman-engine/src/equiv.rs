//! Datasource equivalence between two installations.

use std::collections::HashMap;

use boardman_core::types::DataSource;

use crate::refs::is_reserved;

/// Per-sync remapping from a source installation's datasource uid to the
/// corresponding target installation's uid.
///
/// Invariant: never holds an entry for a reserved identifier — [`insert`]
/// silently refuses them.
///
/// [`insert`]: EquivalenceMap::insert
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceMap(HashMap<String, String>);

impl EquivalenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `from` → `to`, overwriting any earlier entry for `from`.
    /// Reserved identifiers are refused.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if is_reserved(&from) {
            return;
        }
        self.0.insert(from, to.into());
    }

    pub fn get(&self, uid: &str) -> Option<&str> {
        self.0.get(uid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the remapping for one document sync.
///
/// For every source descriptor, the target descriptor with the same
/// `(name, type)` pair supplies the replacement uid. When the target
/// catalog holds several descriptors with the same pair, the
/// later-enumerated one wins. Unmatched source descriptors are simply
/// absent from the result.
pub fn resolve(source: &[DataSource], target: &[DataSource]) -> EquivalenceMap {
    let mut map = EquivalenceMap::new();
    for src in source {
        for dst in target {
            if src.name == dst.name && src.kind == dst.kind {
                map.insert(&src.uid, &dst.uid);
            }
        }
    }
    map
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
