//! Error types for boardman-client.

use thiserror::Error;

/// All errors that can arise from talking to a dashboard installation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The service answered with a non-success status.
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => ClientError::Status {
                url: url.to_owned(),
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => ClientError::Transport {
                url: url.to_owned(),
                reason: transport.to_string(),
            },
        }
    }
}
