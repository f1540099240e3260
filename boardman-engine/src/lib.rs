//! # boardman-engine
//!
//! The pure dashboard-processing core: datasource reference scanning and
//! rewriting, equivalence resolution between installations, normalization
//! and structural diffing.
//!
//! No I/O happens here; every function is a total transformation over
//! [`serde_json::Value`] trees and descriptor slices. The sync orchestrator
//! composes these with the local store and the remote client.

pub mod diff;
pub mod equiv;
pub mod normalize;
pub mod refs;

pub use diff::compare;
pub use equiv::{resolve, EquivalenceMap};
pub use normalize::{normalize, sanitize_tags};
pub use refs::{is_reserved, rewrite, scan, RESERVED_PREFIX};
