//! Birdeye public API client (listings, token metadata, prices).

use std::env;

use async_trait::async_trait;
use retry_http::{HttpRequest, RetryingClient};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::backend::{ListingsBackend, TokenBackend};
use crate::error::ServiceError;
use crate::types::{null_as_default, ListingItem, TokenMeta, TokenPrice};

/// Default Birdeye API URL.
pub const DEFAULT_API_URL: &str = "https://public-api.birdeye.so";

/// Configuration for BirdeyeClient.
#[derive(Debug, Clone)]
pub struct BirdeyeConfig {
    /// API base URL.
    pub api_url: String,
    /// API key, sent as `X-API-KEY` when present.
    pub api_key: Option<String>,
}

impl Default for BirdeyeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
        }
    }
}

impl BirdeyeConfig {
    /// Create configuration from environment variables.
    ///
    /// - `BIRDEYE_API_KEY` - API key (optional)
    /// - `BIRDEYE_API_URL` - API URL (default: https://public-api.birdeye.so)
    pub fn from_env() -> Self {
        let read = |name: &str| {
            env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_url: read("BIRDEYE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: read("BIRDEYE_API_KEY"),
        }
    }

    /// Whether an API key is present.
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Birdeye wraps every payload in `{ success, data }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingPage {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<ListingItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceData {
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    update_unix_time: Option<i64>,
    #[serde(default)]
    price_change_24h: Option<f64>,
    #[serde(default)]
    liquidity: Option<f64>,
}

/// Client for the Birdeye public API on the Solana chain.
#[derive(Clone)]
pub struct BirdeyeClient {
    http: RetryingClient,
    config: BirdeyeConfig,
}

impl BirdeyeClient {
    /// Create a client over an existing retrying HTTP client.
    pub fn new(config: BirdeyeConfig, http: RetryingClient) -> Self {
        Self { http, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &BirdeyeConfig {
        &self.config
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ServiceError> {
        let base = self.config.api_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, path)).map_err(|e| {
            ServiceError::InvalidParameter {
                name: "api_url".to_string(),
                reason: e.to_string(),
            }
        })?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get<T: DeserializeOwned + Default>(&self, url: Url) -> Result<T, ServiceError> {
        debug!(url = %url, "BIRDEYE_REQUEST");

        let request = HttpRequest::get(url.as_str())
            .header("accept", "application/json")
            .header("x-chain", "solana")
            .header_opt("X-API-KEY", self.config.api_key.as_deref());

        let envelope: Envelope<T> = self.http.fetch_json(&request).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

#[async_trait]
impl ListingsBackend for BirdeyeClient {
    async fn new_listings(&self, limit: usize) -> Result<Vec<ListingItem>, ServiceError> {
        let limit = limit.to_string();
        let url = self.url(
            "/defi/v2/tokens/new_listing",
            &[("limit", limit.as_str()), ("meme_platform_enabled", "false")],
        )?;

        let page: ListingPage = self.get(url).await?;
        Ok(page.items)
    }

    fn name(&self) -> &str {
        "birdeye"
    }
}

#[async_trait]
impl TokenBackend for BirdeyeClient {
    async fn token_meta(&self, address: &str) -> Result<TokenMeta, ServiceError> {
        let url = self.url("/defi/v3/token/meta-data/single", &[("address", address)])?;
        let mut meta: TokenMeta = self.get(url).await?;
        if meta.address.is_empty() {
            meta.address = address.to_string();
        }
        Ok(meta)
    }

    async fn token_price(&self, address: &str) -> Result<TokenPrice, ServiceError> {
        let url = self.url(
            "/defi/price",
            &[("address", address), ("include_liquidity", "true")],
        )?;
        let data: PriceData = self.get(url).await?;

        Ok(TokenPrice {
            address: address.to_string(),
            value: data.value,
            price_change_24h: data.price_change_24h,
            liquidity: data.liquidity,
            update_unix_time: data.update_unix_time,
        })
    }

    fn name(&self) -> &str {
        "birdeye"
    }
}
