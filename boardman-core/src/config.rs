//! YAML configuration: installations and transport options.
//!
//! ```yaml
//! inputs:
//!   - name: staging
//!     url: https://grafana.staging.example.net
//!     api_key: "…"              # or api_key_file: /run/secrets/token
//!     include_tags: [prod]      # optional tag allowlist
//!     http:
//!       timeout_secs: 30
//! outputs:
//!   - name: prod
//!     url: https://grafana.example.net
//!     api_key_file: /run/secrets/prod-token
//! ```
//!
//! The structure is built once in `main` and passed by reference through
//! every workflow entry point; there is no process-wide mutable state.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::InstanceName;

// ---------------------------------------------------------------------------
// Transport options
// ---------------------------------------------------------------------------

fn default_timeout_secs() -> u64 {
    10
}

/// Per-installation transport options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpOptions {
    /// Connect/read/write timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Installations
// ---------------------------------------------------------------------------

/// One configured dashboard installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub name: InstanceName,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<PathBuf>,
    /// Tag allowlist for the compare workflow. Empty means "include all".
    #[serde(default)]
    pub include_tags: Vec<String>,
    #[serde(default)]
    pub http: HttpOptions,
}

impl Instance {
    /// Resolve the API credential. A configured `api_key_file` wins over an
    /// inline `api_key`; file contents are trimmed.
    pub fn token(&self) -> Result<String, ConfigError> {
        if let Some(path) = &self.api_key_file {
            let contents = std::fs::read_to_string(path).map_err(|source| {
                ConfigError::ApiKeyFile {
                    path: path.clone(),
                    source,
                }
            })?;
            return Ok(contents.trim().to_owned());
        }
        match &self.api_key {
            Some(key) => Ok(key.clone()),
            None => Err(ConfigError::MissingApiKey {
                instance: self.name.to_string(),
            }),
        }
    }

    /// Inclusion filter: a dashboard is included iff this installation
    /// declares no allowlist, or at least one of the dashboard's tags
    /// matches an allowed tag case-insensitively.
    pub fn includes(&self, tags: &[String]) -> bool {
        if self.include_tags.is_empty() {
            return true;
        }
        tags.iter().any(|tag| {
            self.include_tags
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(tag.trim()))
        })
    }
}

// ---------------------------------------------------------------------------
// Config root
// ---------------------------------------------------------------------------

/// Which list an installation lookup searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceRole {
    Input,
    Output,
}

impl fmt::Display for InstanceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceRole::Input => write!(f, "input"),
            InstanceRole::Output => write!(f, "output"),
        }
    }
}

/// Root of the boardman YAML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: Vec<Instance>,
    #[serde(default)]
    pub outputs: Vec<Instance>,
}

impl Config {
    /// Load the configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The named input installation, or an error before any network activity.
    pub fn input(&self, name: &str) -> Result<&Instance, ConfigError> {
        Self::find(&self.inputs, InstanceRole::Input, name)
    }

    /// The named output installation, or an error before any network activity.
    pub fn output(&self, name: &str) -> Result<&Instance, ConfigError> {
        Self::find(&self.outputs, InstanceRole::Output, name)
    }

    fn find<'a>(
        list: &'a [Instance],
        role: InstanceRole,
        name: &str,
    ) -> Result<&'a Instance, ConfigError> {
        list.iter()
            .find(|instance| instance.name.0 == name)
            .ok_or_else(|| ConfigError::UnknownInstance {
                role,
                name: name.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn instance(name: &str) -> Instance {
        Instance {
            name: InstanceName::from(name),
            url: format!("https://{name}.example.net"),
            api_key: Some("secret".into()),
            api_key_file: None,
            include_tags: vec![],
            http: HttpOptions::default(),
        }
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
inputs:
  - name: staging
    url: https://grafana.staging.example.net
    api_key: abc
    include_tags: [prod, ops]
    http:
      timeout_secs: 30
outputs:
  - name: prod
    url: https://grafana.example.net
    api_key_file: /run/secrets/token
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.inputs.len(), 1);
        assert_eq!(config.outputs.len(), 1);
        assert_eq!(config.inputs[0].name, InstanceName::from("staging"));
        assert_eq!(config.inputs[0].http.timeout_secs, 30);
        assert_eq!(config.inputs[0].include_tags, vec!["prod", "ops"]);
        assert_eq!(
            config.outputs[0].api_key_file,
            Some(PathBuf::from("/run/secrets/token"))
        );
    }

    #[test]
    fn transport_options_default_when_absent() {
        let yaml = "inputs:\n  - name: a\n    url: http://a\n";
        let config: Config = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.inputs[0].http, HttpOptions::default());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/boardman.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(b"inputs: {not a list}").expect("write");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_instance_names_the_role() {
        let config = Config {
            inputs: vec![instance("staging")],
            outputs: vec![],
        };
        assert!(config.input("staging").is_ok());
        let err = config.output("prod").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no output installation named 'prod' in configuration"
        );
    }

    #[test]
    fn token_prefers_file_and_trims_it() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(b"  file-secret\n").expect("write");

        let mut inst = instance("a");
        inst.api_key_file = Some(file.path().to_path_buf());
        assert_eq!(inst.token().expect("token"), "file-secret");
    }

    #[test]
    fn token_missing_everywhere_is_an_error() {
        let mut inst = instance("a");
        inst.api_key = None;
        let err = inst.token().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn empty_allowlist_includes_everything() {
        let inst = instance("a");
        assert!(inst.includes(&[]));
        assert!(inst.includes(&["anything".into()]));
    }

    #[test]
    fn allowlist_matches_case_insensitively() {
        let mut inst = instance("a");
        inst.include_tags = vec!["Prod".into()];
        assert!(inst.includes(&["prod".into()]));
        assert!(inst.includes(&[" PROD ".into(), "dev".into()]));
        assert!(!inst.includes(&["dev".into()]));
        assert!(!inst.includes(&[]));
    }
}
