//! `GET /health`: liveness plus what this instance is wired to.

use axum::extract::State;
use axum::Json;
use orchestrator::IntentKind;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    /// Provider tiers in cascade order; empty means keyword fallback only.
    pub providers: Vec<String>,
    /// Intent kinds with a registered service.
    pub services: Vec<&'static str>,
    /// Clients held by the rate limiter.
    pub tracked_clients: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let orchestrator = &state.orchestrator;

    Json(HealthReport {
        status: "ok",
        providers: orchestrator
            .classifier()
            .tier_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        services: orchestrator
            .dispatcher()
            .registry()
            .kinds()
            .iter()
            .map(IntentKind::as_str)
            .collect(),
        tracked_clients: state.limiter.clients().await,
    })
}
