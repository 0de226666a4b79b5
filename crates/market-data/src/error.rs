//! Error types for market data backends.

use retry_http::HttpError;
use thiserror::Error;

/// Errors that can occur while fetching market data.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The HTTP call failed or returned a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The backend reported a failure; the message is shown as-is.
    #[error("{0}")]
    Backend(String),

    /// No swap route exists for the requested pair.
    #[error("No route found")]
    NoRoute,

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ServiceError {
    /// Create a backend error from any message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
