//! Error types for boardman-sync.
//!
//! Every variant is fatal to the enclosing workflow: the first failure
//! aborts the remaining documents of the current (source, target) pair and
//! surfaces to the top level. Documents already processed are not rolled
//! back.

use std::path::PathBuf;

use thiserror::Error;

use boardman_client::ClientError;
use boardman_core::error::ConfigError;

/// All errors that can arise from sync workflows.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Local store I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored dashboard file that does not parse.
    #[error("malformed dashboard file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An error from the configuration layer (raised before any network
    /// activity).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any failure from the remote dashboard service.
    #[error("remote error: {0}")]
    Remote(#[from] ClientError),

    /// Report / ledger serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored dashboard whose tree carries no uid.
    #[error("dashboard file {path} has no uid")]
    MissingUid { path: PathBuf },

    /// A uid named on the command line with no matching local dashboard.
    #[error("dashboard '{uid}' not found in the local store")]
    BoardNotFound { uid: String },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
