//! Retrying HTTP client for outbound provider and backend calls.
//!
//! Every network call the query router makes (AI providers, market data
//! backends, swap quotes) goes through a [`RetryingClient`]. The client
//! retries transient failures with exponential backoff and otherwise hands
//! the response back untouched so callers decide what a non-2xx means.
//!
//! - Status `429` and `5xx` are retried, then returned as-is once the
//!   attempt budget is spent.
//! - Transport errors (DNS, connect, timeout) are retried, then the last
//!   error is returned.
//! - Any other status is returned immediately.
//!
//! # Example
//!
//! ```rust,no_run
//! use retry_http::{HttpRequest, RetryingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), retry_http::HttpError> {
//!     let client = RetryingClient::from_reqwest()?;
//!     let request = HttpRequest::get("https://quote-api.jup.ag/v6/quote")
//!         .header("accept", "application/json");
//!
//!     let response = client.send(&request).await?;
//!     println!("status: {}", response.status);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod transport;
mod types;

pub use client::{
    is_retryable_status, RetryPolicy, RetryingClient, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS,
};
pub use error::HttpError;
pub use transport::{HttpTransport, ReqwestTransport};
pub use types::{HttpRequest, HttpResponse, Method};

// Re-export async_trait for transport implementations
pub use async_trait::async_trait;
