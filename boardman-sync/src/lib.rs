//! # boardman-sync
//!
//! The sync orchestrator: fetch / compare / upload / snapshot workflows
//! composing the engine, the remote client and the local store.
//!
//! All workflows are synchronous and sequential — outer iteration over
//! installation pairs, inner iteration over documents. Any per-document
//! failure aborts the remaining work for that pair (fail-fast, no
//! rollback).

pub mod compare;
pub mod error;
pub mod fetch;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod upload;

pub use compare::compare_all;
pub use error::SyncError;
pub use fetch::{fetch_all, FetchOutcome};
pub use report::{BoardChange, ChangeAction, Report};
pub use snapshot::{snapshot_boards, SnapshotOutcome};
pub use store::WriteResult;
pub use upload::{upload_boards, UploadOutcome};
