//! HTTP API for the SolGo query router.
//!
//! Routes:
//! - `POST /api/query` - route a free-text question
//! - `POST /api/quote` - swap quote
//! - `POST /api/signin` - register a wallet
//! - `GET /health`

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod users;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use rate_limit::RateLimiter;
pub use routes::router;
pub use state::AppState;
pub use users::{User, UserStore};

/// Build the application with its state attached.
pub fn app(state: AppState) -> axum::Router {
    routes::router().with_state(state)
}
