//! Error types for outbound HTTP calls.

use thiserror::Error;

/// Errors that can occur when talking to a remote HTTP endpoint.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport failed before a response arrived (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("{method} {url} -> {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpError {
    /// Status code carried by this error, if the endpoint answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
