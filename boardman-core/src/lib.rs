//! Boardman core library — domain types, configuration, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and the on-disk dashboard document
//! - [`config`] — YAML configuration for input/output installations
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, HttpOptions, Instance, InstanceRole};
pub use error::ConfigError;
pub use types::{BoardFile, DataSource, FolderRef, InstanceName};
