//! Errors returned by the Motion client.
//!
//! The `Status` message embeds the numeric code ("Motion API error: 401 Unauthorized");
//! command boundaries look for those substrings to pick troubleshooting hints.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response from the service
    #[error("Motion API error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    /// Connection, TLS or timeout failure
    #[error("Motion API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body did not match the expected shape
    #[error("Motion API returned an unexpected body for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected locally; no request was sent
    #[error("invalid API key: contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    /// The key cannot see any workspace to create tasks in
    #[error("no accessible workspace found (workspaceId could not be resolved)")]
    NoWorkspace,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
