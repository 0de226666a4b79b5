//! Application state shared across handlers.

use std::sync::Arc;

use market_data::QuoteBackend;
use orchestrator::Orchestrator;

use crate::config::ApiConfig;
use crate::rate_limit::RateLimiter;
use crate::users::UserStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Query router.
    pub orchestrator: Arc<Orchestrator>,
    /// Swap quote backend.
    pub quotes: Arc<dyn QuoteBackend>,
    /// Signed-in wallets.
    pub users: Arc<UserStore>,
    /// Rate limiter for `/api/query`.
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create new application state.
    pub fn new(orchestrator: Arc<Orchestrator>, quotes: Arc<dyn QuoteBackend>, config: &ApiConfig) -> Self {
        let limiter = RateLimiter::new(config.rate_capacity, config.rate_refill, config.rate_max_clients);
        Self {
            orchestrator,
            quotes,
            users: Arc::new(UserStore::new()),
            limiter: Arc::new(limiter),
        }
    }
}
