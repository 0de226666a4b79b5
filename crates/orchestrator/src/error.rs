//! Error types for orchestration.

use market_data::ServiceError;
use retry_http::HttpError;
use thiserror::Error;

use crate::intent::IntentKind;

/// Errors that can occur while routing a query.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A data service failed. The backend's message surfaces verbatim.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A service answered with a kind other than the one it was dispatched for.
    #[error("Invalid service kind")]
    InvalidServiceKind {
        expected: IntentKind,
        actual: IntentKind,
    },

    /// No service is registered for the kind.
    #[error("no service registered for {0}")]
    NoService(IntentKind),

    /// Building a client failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
