//! Retrying client with exponential backoff.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::HttpError;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{HttpRequest, HttpResponse};

/// Default number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(600);

/// Retry budget for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on every subsequent retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Backoff after the attempt with the given zero-based index.
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt_index);
        self.base_delay.saturating_mul(factor)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Whether a status code is worth retrying (`429` or any `5xx`).
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// HTTP client that retries transient failures.
///
/// Cloning is cheap; clones share the underlying transport.
#[derive(Clone)]
pub struct RetryingClient {
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
}

impl RetryingClient {
    /// Create a client over the given transport with the default policy.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_policy(transport, RetryPolicy::default())
    }

    /// Create a client over the given transport and policy.
    pub fn with_policy(transport: Arc<dyn HttpTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Create a client backed by `reqwest` with the default policy.
    pub fn from_reqwest() -> Result<Self, HttpError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new()?)))
    }

    /// The retry policy in use.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Return a copy of this client using a different policy.
    pub fn with_retry_policy(&self, policy: RetryPolicy) -> Self {
        Self {
            transport: self.transport.clone(),
            policy,
        }
    }

    /// Send a request, retrying `429`/`5xx` responses and transport errors.
    ///
    /// Once the attempt budget is spent, a retryable response is returned
    /// unmodified and a transport error is returned as the error.
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let attempts = self.policy.attempts();
        let mut last_error = None;

        for attempt in 0..attempts {
            let is_last = attempt + 1 == attempts;

            match self.transport.execute(request).await {
                Ok(response) if is_retryable_status(response.status) => {
                    if is_last {
                        warn!(
                            method = request.method.as_str(),
                            url = %request.url,
                            status = response.status,
                            attempts,
                            "HTTP_RETRIES_EXHAUSTED"
                        );
                        return Ok(response);
                    }
                    let delay = self.policy.delay_for(attempt);
                    debug!(
                        status = response.status,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "HTTP_RETRY_STATUS"
                    );
                    sleep(delay).await;
                }
                Ok(response) => return Ok(response),
                Err(error) => {
                    warn!(
                        method = request.method.as_str(),
                        url = %request.url,
                        attempt = attempt + 1,
                        error = %error,
                        "HTTP_TRANSPORT_ERROR"
                    );
                    last_error = Some(error);
                    if !is_last {
                        sleep(self.policy.delay_for(attempt)).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| HttpError::Transport("no attempt was made".to_string())))
    }

    /// Send a request and decode a 2xx JSON body.
    ///
    /// A non-2xx final response becomes [`HttpError::Status`].
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<T, HttpError> {
        let response = self.send(request).await?;

        if !response.is_success() {
            return Err(HttpError::Status {
                method: request.method.as_str().to_string(),
                url: request.url.clone(),
                status: response.status,
                body: response.text(),
            });
        }

        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Transport that replays a fixed script and records call instants.
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, HttpError> {
            self.calls.lock().unwrap().push(Instant::now());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(200, "")))
        }
    }

    /// Transport that always fails at the network level.
    struct BrokenTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpTransport for BrokenTransport {
        async fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, HttpError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(HttpError::Transport(format!("connection refused #{}", n)))
        }
    }

    fn request() -> HttpRequest {
        HttpRequest::get("https://example.com/data")
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(599));
        assert!(!is_retryable_status(200));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(600));
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(600));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_success_after_two_retries() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpResponse::new(500, "boom")),
            Ok(HttpResponse::new(500, "boom")),
            Ok(HttpResponse::new(200, "ok")),
        ]);
        let client = RetryingClient::new(transport.clone());

        let response = client.send(&request()).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "ok");

        let calls = transport.call_times();
        assert_eq!(calls.len(), 3);
        assert!(calls[1] - calls[0] >= Duration::from_millis(600));
        assert!(calls[2] - calls[1] >= Duration::from_millis(1200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retryable_status_returned_as_is() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpResponse::new(429, "slow down")),
            Ok(HttpResponse::new(429, "slow down")),
            Ok(HttpResponse::new(503, "unavailable")),
        ]);
        let client = RetryingClient::new(transport.clone());

        let response = client.send(&request()).await.unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(transport.call_times().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_error_not_retried() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpResponse::new(404, "missing")),
            Ok(HttpResponse::new(200, "never")),
        ]);
        let client = RetryingClient::new(transport.clone());

        let response = client.send(&request()).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(transport.call_times().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_errors_reraised_after_max_attempts() {
        let transport = Arc::new(BrokenTransport {
            calls: AtomicUsize::new(0),
        });
        let client = RetryingClient::with_policy(
            transport.clone(),
            RetryPolicy::new(4, Duration::from_millis(10)),
        );

        let error = client.send(&request()).await.unwrap_err();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 4);
        match error {
            HttpError::Transport(msg) => assert!(msg.contains("#4")),
            other => panic!("Expected transport error, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_then_success() {
        let transport = ScriptedTransport::new(vec![
            Err(HttpError::Transport("reset".to_string())),
            Ok(HttpResponse::new(200, "{}")),
        ]);
        let client = RetryingClient::new(transport.clone());

        let response = client.send(&request()).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(transport.call_times().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_json_maps_status_error() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse::new(401, "nope"))]);
        let client = RetryingClient::new(transport);

        let error = client
            .fetch_json::<serde_json::Value>(&request())
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(401));
        assert_eq!(error.to_string(), "GET https://example.com/data -> 401");
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_body() {
        let transport =
            ScriptedTransport::new(vec![Ok(HttpResponse::new(200, r#"{"value": 42}"#))]);
        let client = RetryingClient::new(transport);

        let body: serde_json::Value = client.fetch_json(&request()).await.unwrap();
        assert_eq!(body["value"], 42);
    }

    #[tokio::test]
    async fn test_reqwest_transport_against_mock_server() {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-chain", "solana"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&server)
            .await;

        let client = RetryingClient::from_reqwest().unwrap();
        let request = HttpRequest::get(format!("{}/ping", server.uri())).header("x-chain", "solana");
        let response = client.send(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "pong");
    }
}
