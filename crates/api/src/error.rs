//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use market_data::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by handlers. Every variant renders `{ok: false, error}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is missing a required field.
    #[error("{0}")]
    BadRequest(&'static str),

    /// The client exhausted its rate limit.
    #[error("Too many requests. Slow down.")]
    RateLimited,

    /// A backend call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Service(err) => error!(error = %err, "BACKEND_ERROR"),
            other => warn!(status = status.as_u16(), error = %other, "REQUEST_REJECTED"),
        }

        let body = serde_json::json!({
            "ok": false,
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("Missing prompt").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::Service(ServiceError::NoRoute).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::BadRequest("Missing wallet").to_string(), "Missing wallet");
        assert_eq!(ApiError::RateLimited.to_string(), "Too many requests. Slow down.");
        assert_eq!(ApiError::from(ServiceError::NoRoute).to_string(), "No route found");
    }
}
