//! Transport abstraction and the reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

use crate::error::HttpError;
use crate::types::{HttpRequest, HttpResponse, Method};

/// A single-shot HTTP transport.
///
/// Implementations perform exactly one attempt; retry behaviour lives in
/// [`RetryingClient`](crate::RetryingClient).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform the request once.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a 30 second per-attempt timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a transport with a custom per-attempt timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .user_agent("SolGo/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::InvalidRequest(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        trace!(
            method = request.method.as_str(),
            url = %request.url,
            status,
            body_len = body.len(),
            "HTTP_RESPONSE"
        );

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
