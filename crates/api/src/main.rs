//! SolGo API server.

use std::sync::Arc;

use api::{ApiConfig, AppState};
use market_data::{JupiterClient, JupiterConfig};
use orchestrator::{Orchestrator, RouterConfig};
use retry_http::RetryingClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,orchestrator=info,info".into()),
        )
        .init();

    let config = ApiConfig::from_env()?;
    let router_config = RouterConfig::from_env();
    info!(addr = %config.addr, "Starting SolGo API");

    let orchestrator = Orchestrator::from_config(&router_config)?;
    let http = RetryingClient::from_reqwest()?.with_retry_policy(router_config.retry_policy());
    let quotes = JupiterClient::new(JupiterConfig::from_env(), http);

    let state = AppState::new(Arc::new(orchestrator), Arc::new(quotes), &config);
    let app = api::app(state);

    info!(addr = %config.addr, "SolGo API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
