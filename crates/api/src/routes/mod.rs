//! Route handlers for the API.

pub mod health;
pub mod query;
pub mod quote;
pub mod signin;

use axum::body::Bytes;
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/query", post(query::query))
        .route("/api/quote", post(quote::quote))
        .route("/api/signin", post(signin::signin))
}

/// Parse a JSON body, treating anything unparsable as an empty object.
pub(crate) fn lenient_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// A non-blank string field.
pub(crate) fn string_field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
}
