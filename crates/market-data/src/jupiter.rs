//! Jupiter aggregator quote client.

use std::env;

use async_trait::async_trait;
use retry_http::{HttpRequest, RetryingClient};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::backend::QuoteBackend;
use crate::error::ServiceError;
use crate::types::{SwapQuote, SwapQuoteRequest};

/// Default Jupiter quote API URL.
pub const DEFAULT_API_URL: &str = "https://quote-api.jup.ag";

/// Configuration for JupiterClient.
#[derive(Debug, Clone)]
pub struct JupiterConfig {
    pub api_url: String,
}

impl Default for JupiterConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl JupiterConfig {
    /// Read `JUPITER_API_URL`, falling back to the public endpoint.
    pub fn from_env() -> Self {
        let api_url = env::var("JUPITER_API_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_url }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    #[serde(default)]
    in_amount: String,
    #[serde(default)]
    out_amount: String,
    #[serde(default)]
    price_impact_pct: Option<String>,
    #[serde(default)]
    route_plan: Vec<serde_json::Value>,
}

/// Client for the Jupiter v6 quote endpoint.
#[derive(Clone)]
pub struct JupiterClient {
    http: RetryingClient,
    config: JupiterConfig,
}

impl JupiterClient {
    pub fn new(config: JupiterConfig, http: RetryingClient) -> Self {
        Self { http, config }
    }

    fn quote_url(&self, request: &SwapQuoteRequest) -> Result<Url, ServiceError> {
        let base = self.config.api_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/v6/quote", base)).map_err(|e| {
            ServiceError::InvalidParameter {
                name: "api_url".to_string(),
                reason: e.to_string(),
            }
        })?;

        url.query_pairs_mut()
            .append_pair("inputMint", &request.input_mint)
            .append_pair("outputMint", &request.output_mint)
            .append_pair("amount", &request.amount)
            .append_pair("slippageBps", &request.slippage_bps.to_string())
            .append_pair("swapMode", "ExactIn");

        Ok(url)
    }
}

#[async_trait]
impl QuoteBackend for JupiterClient {
    async fn quote(&self, request: &SwapQuoteRequest) -> Result<SwapQuote, ServiceError> {
        let url = self.quote_url(request)?;
        debug!(url = %url, "JUPITER_QUOTE_REQUEST");

        let response = self
            .http
            .send(&HttpRequest::get(url.as_str()).header("accept", "application/json"))
            .await?;

        if !response.is_success() {
            return Err(ServiceError::backend(format!(
                "Jupiter quote failed {}: {}",
                response.status,
                response.text()
            )));
        }

        let quote: QuoteResponse = response.json()?;
        if quote.route_plan.is_empty() {
            return Err(ServiceError::NoRoute);
        }

        Ok(SwapQuote {
            in_amount: quote.in_amount,
            out_amount: quote.out_amount,
            price_impact_pct: quote.price_impact_pct,
            route_count: quote.route_plan.len(),
        })
    }

    fn name(&self) -> &str {
        "jupiter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{SOL_MINT, USDC_MINT};
    use retry_http::{ReqwestTransport, RetryPolicy};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> JupiterClient {
        let http = RetryingClient::with_policy(
            Arc::new(ReqwestTransport::new().unwrap()),
            RetryPolicy::new(1, Duration::from_millis(1)),
        );
        JupiterClient::new(JupiterConfig { api_url: server.uri() }, http)
    }

    fn usdc_to_sol() -> SwapQuoteRequest {
        SwapQuoteRequest {
            input_mint: USDC_MINT.to_string(),
            output_mint: SOL_MINT.to_string(),
            amount: "1000000".to_string(),
            slippage_bps: 50,
        }
    }

    #[tokio::test]
    async fn test_quote_summarizes_routes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6/quote"))
            .and(query_param("amount", "1000000"))
            .and(query_param("slippageBps", "50"))
            .and(query_param("swapMode", "ExactIn"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "inAmount": "1000000",
                "outAmount": "6993",
                "priceImpactPct": "0.0001",
                "routePlan": [{ "percent": 100 }, { "percent": 0 }]
            })))
            .mount(&server)
            .await;

        let quote = client_for(&server).quote(&usdc_to_sol()).await.unwrap();
        assert_eq!(quote.out_amount, "6993");
        assert_eq!(quote.route_count, 2);
    }

    #[tokio::test]
    async fn test_empty_route_plan_is_no_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "inAmount": "1", "outAmount": "0", "routePlan": []
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).quote(&usdc_to_sol()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NoRoute));
        assert_eq!(err.to_string(), "No route found");
    }

    #[tokio::test]
    async fn test_error_status_includes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad mint"))
            .mount(&server)
            .await;

        let err = client_for(&server).quote(&usdc_to_sol()).await.unwrap_err();
        assert_eq!(err.to_string(), "Jupiter quote failed 400: bad mint");
    }
}
