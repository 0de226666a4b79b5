//! Backend traits implemented by live clients, demo data and test stubs.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::types::{HoldersPage, ListingItem, SwapQuote, SwapQuoteRequest, TokenMeta, TokenPrice};

/// Source of newly listed tokens.
#[async_trait]
pub trait ListingsBackend: Send + Sync {
    /// Fetch at most `limit` of the newest listings, newest first.
    async fn new_listings(&self, limit: usize) -> Result<Vec<ListingItem>, ServiceError>;

    /// Backend name used in logs.
    fn name(&self) -> &str;

    /// Whether the data is fixed demo data.
    fn is_demo(&self) -> bool {
        false
    }
}

/// Source of token metadata and prices.
#[async_trait]
pub trait TokenBackend: Send + Sync {
    /// Metadata for a mint address.
    async fn token_meta(&self, address: &str) -> Result<TokenMeta, ServiceError>;

    /// Spot price for a mint address.
    async fn token_price(&self, address: &str) -> Result<TokenPrice, ServiceError>;

    /// Backend name used in logs.
    fn name(&self) -> &str;

    /// Whether the data is fixed demo data.
    fn is_demo(&self) -> bool {
        false
    }
}

/// Source of holder rankings.
#[async_trait]
pub trait HoldersBackend: Send + Sync {
    /// Top holders of `token`; `None` lets the backend decide.
    async fn top_holders(&self, token: Option<&str>) -> Result<HoldersPage, ServiceError>;

    /// Backend name used in logs.
    fn name(&self) -> &str;
}

/// Source of swap quotes.
#[async_trait]
pub trait QuoteBackend: Send + Sync {
    async fn quote(&self, request: &SwapQuoteRequest) -> Result<SwapQuote, ServiceError>;

    /// Backend name used in logs.
    fn name(&self) -> &str;
}
