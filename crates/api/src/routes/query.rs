//! `POST /api/query`: route a free-text question.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, info};

use super::{lenient_json, string_field};
use crate::error::ApiError;
use crate::rate_limit::client_key;
use crate::state::AppState;

/// Body: `{prompt, wallet?}`.
///
/// The rate limit is checked first, then the prompt. The envelope is
/// returned with 200 when `ok` and 500 otherwise.
pub async fn query(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let client = client_key(&headers);
    if !state.limiter.allow(&client).await {
        return Err(ApiError::RateLimited);
    }

    let body = lenient_json(&body);
    let prompt = string_field(&body, "prompt").ok_or(ApiError::BadRequest("Missing prompt"))?;
    let wallet = body.get("wallet").and_then(|w| w.as_str());

    debug!(client = %client, prompt_len = prompt.len(), "QUERY_RECEIVED");
    let envelope = state.orchestrator.route(prompt, wallet).await;

    let status = if envelope.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    info!(
        client = %client,
        status = status.as_u16(),
        service = %envelope.meta().svc.name,
        "QUERY_ROUTED"
    );

    Ok((status, Json(envelope)).into_response())
}
