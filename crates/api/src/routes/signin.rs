//! `POST /api/signin`: register a wallet.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::{lenient_json, string_field};
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::User;

#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub ok: bool,
    pub user: User,
}

/// Body: `{wallet}`. Returns the existing user or a new one.
pub async fn signin(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SigninResponse>, ApiError> {
    let body = lenient_json(&body);
    let wallet = string_field(&body, "wallet").ok_or(ApiError::BadRequest("Missing wallet"))?;

    let user = state.users.upsert_by_wallet(wallet).await;
    Ok(Json(SigninResponse { ok: true, user }))
}
