//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Default bind address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

/// Requests a client may burst.
pub const DEFAULT_RATE_CAPACITY: u32 = 6;

/// Time to earn back one request.
pub const DEFAULT_RATE_REFILL: Duration = Duration::from_millis(4000);

/// Clients tracked by the rate limiter before the least recent is evicted.
pub const DEFAULT_RATE_MAX_CLIENTS: usize = 10_000;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Token bucket size per client.
    pub rate_capacity: u32,
    /// Interval at which one token is added back.
    pub rate_refill: Duration,
    /// Upper bound on rate limiter buckets.
    pub rate_max_clients: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            rate_capacity: DEFAULT_RATE_CAPACITY,
            rate_refill: DEFAULT_RATE_REFILL,
            rate_max_clients: DEFAULT_RATE_MAX_CLIENTS,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SOLGO_API_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `SOLGO_RATE_CAPACITY` | Burst size per client | `6` |
    /// | `SOLGO_RATE_REFILL_MS` | Milliseconds per refilled request | `4000` |
    /// | `SOLGO_RATE_MAX_CLIENTS` | Rate limiter buckets kept | `10000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SOLGO_API_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let rate_capacity = match env::var("SOLGO_RATE_CAPACITY") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::InvalidNumber("SOLGO_RATE_CAPACITY"))?,
            Err(_) => DEFAULT_RATE_CAPACITY,
        };

        let rate_refill = match env::var("SOLGO_RATE_REFILL_MS") {
            Ok(v) => v
                .trim()
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber("SOLGO_RATE_REFILL_MS"))?,
            Err(_) => DEFAULT_RATE_REFILL,
        };

        let rate_max_clients = match env::var("SOLGO_RATE_MAX_CLIENTS") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("SOLGO_RATE_MAX_CLIENTS"))?,
            Err(_) => DEFAULT_RATE_MAX_CLIENTS,
        };

        Ok(Self {
            addr,
            rate_capacity,
            rate_refill,
            rate_max_clients,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SOLGO_API_ADDR format")]
    InvalidAddr,

    #[error("{0} must be a non-negative integer")]
    InvalidNumber(&'static str),
}
