//! Error types for brain operations.

use thiserror::Error;

/// Errors that can occur when asking a provider for a completion.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The provider is not configured (missing credentials).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with an error status.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider answered but the payload was unusable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The completion could not be produced for another reason.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
