//! Error types for boardman-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::InstanceRole;

/// All errors that can arise from configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A named installation is not present in the configuration.
    /// Raised before any network activity.
    #[error("no {role} installation named '{name}' in configuration")]
    UnknownInstance { role: InstanceRole, name: String },

    /// An installation declares neither `api_key` nor `api_key_file`.
    #[error("installation '{instance}' has neither api_key nor api_key_file")]
    MissingApiKey { instance: String },

    /// The referenced `api_key_file` could not be read.
    #[error("failed to read api key file {path}: {source}")]
    ApiKeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
