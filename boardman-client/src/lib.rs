//! # boardman-client
//!
//! Blocking HTTP client for one dashboard installation. One [`Client`] is
//! built per configured installation; every call blocks until response or
//! transport failure and propagates errors immediately — no retries, no
//! backoff beyond what the transport enforces.

pub mod error;

pub use error::ClientError;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ureq::Agent;

use boardman_core::config::Instance;
use boardman_core::error::ConfigError;
use boardman_core::types::DataSource;

/// Upper bound of the sequential datasource scan. Installations with more
/// datasources than this are silently truncated.
pub const DATASOURCE_SCAN_CAP: u64 = 128;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One row of the remote search listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardSummary {
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "folderUid")]
    pub folder_uid: String,
    #[serde(default, rename = "folderTitle")]
    pub folder_title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Full document fetch: the body tree plus its placement metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardPayload {
    pub dashboard: Value,
    #[serde(default)]
    pub meta: BoardMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoardMeta {
    #[serde(default, rename = "folderUid")]
    pub folder_uid: String,
    #[serde(default, rename = "folderTitle")]
    pub folder_title: String,
}

/// A folder known to the installation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Folder {
    pub uid: String,
    pub title: String,
}

/// A created snapshot: its public URL and the deletion handle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Snapshot {
    pub url: String,
    #[serde(default, rename = "deleteUrl")]
    pub delete_url: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for a single installation, carrying its base URL, bearer
/// token and a configured agent.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    token: String,
    http: Agent,
}

impl Client {
    /// Build a client for a configured installation. The credential is
    /// resolved up front so a bad `api_key_file` fails before any request.
    pub fn for_instance(instance: &Instance) -> Result<Self, ConfigError> {
        let token = instance.token()?;
        let timeout = Duration::from_secs(instance.http.timeout_secs);
        let http = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Ok(Self {
            base_url: instance.url.trim_end_matches('/').to_owned(),
            token,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        let response = self
            .http
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .call()
            .map_err(|err| ClientError::from_ureq(&url, err))?;
        response
            .into_json()
            .map_err(|source| ClientError::Decode { url, source })
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Serialize,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(body)
            .map_err(|err| ClientError::from_ureq(&url, err))?;
        response
            .into_json()
            .map_err(|source| ClientError::Decode { url, source })
    }

    /// List document summaries for every dashboard on the installation.
    pub fn search(&self) -> Result<Vec<BoardSummary>, ClientError> {
        let url = self.url("/api/search");
        let response = self
            .http
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .query("type", "dash-db")
            .call()
            .map_err(|err| ClientError::from_ureq(&url, err))?;
        response
            .into_json()
            .map_err(|source| ClientError::Decode { url, source })
    }

    /// Fetch a full document by identity.
    pub fn board(&self, uid: &str) -> Result<BoardPayload, ClientError> {
        self.get_json(&format!("/api/dashboards/uid/{uid}"))
    }

    /// Create or overwrite a document, optionally placing it in a folder.
    pub fn set_board(
        &self,
        board: &Value,
        folder_uid: Option<&str>,
        overwrite: bool,
    ) -> Result<(), ClientError> {
        let mut body = Map::new();
        body.insert("dashboard".to_owned(), board.clone());
        body.insert("overwrite".to_owned(), Value::Bool(overwrite));
        if let Some(folder) = folder_uid {
            body.insert("folderUid".to_owned(), Value::String(folder.to_owned()));
        }
        let _: Value = self.post_json("/api/dashboards/db", Value::Object(body))?;
        Ok(())
    }

    /// Delete a document by identity.
    pub fn delete_board(&self, uid: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/dashboards/uid/{uid}"));
        self.http
            .delete(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .call()
            .map_err(|err| ClientError::from_ureq(&url, err))?;
        Ok(())
    }

    /// One slot of the datasource catalog; `None` when the index does not
    /// exist on the installation.
    pub fn datasource(&self, index: u64) -> Result<Option<DataSource>, ClientError> {
        let url = self.url(&format!("/api/datasources/{index}"));
        match self
            .http
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .call()
        {
            Ok(response) => response
                .into_json()
                .map(Some)
                .map_err(|source| ClientError::Decode { url, source }),
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(err) => Err(ClientError::from_ureq(&url, err)),
        }
    }

    /// Bounded sequential enumeration of the installation's datasource
    /// catalog: indexes `1..=DATASOURCE_SCAN_CAP`, where "not found" at an
    /// index is treated as end-of-catalog.
    pub fn datasources(&self) -> Result<Vec<DataSource>, ClientError> {
        let mut catalog = Vec::new();
        for index in 1..=DATASOURCE_SCAN_CAP {
            match self.datasource(index)? {
                Some(descriptor) => catalog.push(descriptor),
                None => break,
            }
        }
        Ok(catalog)
    }

    /// List every folder on the installation.
    pub fn folders(&self) -> Result<Vec<Folder>, ClientError> {
        self.get_json("/api/folders")
    }

    /// Create a folder by title.
    pub fn create_folder(&self, title: &str) -> Result<Folder, ClientError> {
        self.post_json("/api/folders", serde_json::json!({ "title": title }))
    }

    /// Create a time-limited public snapshot of a document.
    pub fn snapshot(&self, board: &Value, expires_secs: u64) -> Result<Snapshot, ClientError> {
        self.post_json(
            "/api/snapshots",
            serde_json::json!({ "dashboard": board, "expires": expires_secs }),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use boardman_core::config::HttpOptions;
    use boardman_core::types::InstanceName;

    use super::*;

    fn instance(url: &str) -> Instance {
        Instance {
            name: InstanceName::from("test"),
            url: url.to_owned(),
            api_key: Some("token".into()),
            api_key_file: None,
            include_tags: vec![],
            http: HttpOptions::default(),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::for_instance(&instance("http://grafana.local/")).expect("client");
        assert_eq!(
            client.url("/api/search"),
            "http://grafana.local/api/search"
        );
    }

    #[test]
    fn missing_credential_fails_before_any_request() {
        let mut inst = instance("http://grafana.local");
        inst.api_key = None;
        assert!(Client::for_instance(&inst).is_err());
    }

    #[test]
    fn search_row_deserializes_with_and_without_folder() {
        let rows: Vec<BoardSummary> = serde_json::from_str(
            r#"[
                {"uid": "abc", "title": "T", "folderUid": "f1",
                 "folderTitle": "Ops", "tags": ["prod"]},
                {"uid": "root", "title": "General board"}
            ]"#,
        )
        .expect("deserialize");
        assert_eq!(rows[0].folder_uid, "f1");
        assert_eq!(rows[0].tags, vec!["prod"]);
        assert_eq!(rows[1].folder_uid, "");
        assert!(rows[1].tags.is_empty());
    }

    #[test]
    fn board_payload_deserializes_meta() {
        let payload: BoardPayload = serde_json::from_str(
            r#"{"dashboard": {"uid": "abc"},
                "meta": {"folderUid": "f1", "folderTitle": "Ops", "slug": "abc"}}"#,
        )
        .expect("deserialize");
        assert_eq!(payload.dashboard["uid"], "abc");
        assert_eq!(payload.meta.folder_title, "Ops");
    }

    #[test]
    fn snapshot_url_deserializes() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"key": "k", "deleteKey": "dk",
                "url": "https://grafana.local/dashboard/snapshot/k",
                "deleteUrl": "https://grafana.local/api/snapshots-delete/dk"}"#,
        )
        .expect("deserialize");
        assert_eq!(snapshot.url, "https://grafana.local/dashboard/snapshot/k");
    }
}
