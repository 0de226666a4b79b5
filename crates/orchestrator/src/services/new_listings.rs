//! Newly listed tokens, enriched with a sample token and a swap CTA.

use std::sync::Arc;

use async_trait::async_trait;
use market_data::{ListingItem, ListingsBackend, ServiceError, SwapQuoteRequest, TokenBackend, USDC_MINT};
use tracing::{debug, warn};

use super::{Insight, Service, ServiceResult, DEMO_SOURCE};
use crate::actions::{Cta, CtaAction};
use crate::intent::{Intent, IntentKind};
use crate::summarizer::Summarizer;
use crate::table::{ListingRow, TableRow};

/// Default page size for listings.
pub const DEFAULT_LISTINGS_LIMIT: usize = 10;

/// 1 USDC in base units (6 decimals).
const SWAP_QUOTE_AMOUNT: &str = "1000000";

const SWAP_QUOTE_SLIPPAGE_BPS: u16 = 50;

/// Lists new tokens and summarizes what was fetched.
pub struct NewListingsService {
    listings: Arc<dyn ListingsBackend>,
    tokens: Arc<dyn TokenBackend>,
    summarizer: Arc<Summarizer>,
    limit: usize,
}

impl NewListingsService {
    pub fn new(
        listings: Arc<dyn ListingsBackend>,
        tokens: Arc<dyn TokenBackend>,
        summarizer: Arc<Summarizer>,
    ) -> Self {
        Self {
            listings,
            tokens,
            summarizer,
            limit: DEFAULT_LISTINGS_LIMIT,
        }
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Fetch metadata and price of the first listing concurrently.
    ///
    /// A failed sub-fetch only drops its insight.
    async fn sample_insights(&self, first: &ListingItem, result: &mut ServiceResult) {
        let (meta, price) = tokio::join!(
            self.tokens.token_meta(&first.address),
            self.tokens.token_price(&first.address)
        );

        match meta {
            Ok(meta) => {
                let symbol = if meta.symbol.is_empty() {
                    first.symbol.as_str()
                } else {
                    meta.symbol.as_str()
                };
                result.insights.push(Insight::new(
                    "Sample token",
                    format!("{} • {}", symbol, meta.address),
                ));
            }
            Err(e) => warn!(error = %e, address = %first.address, "LISTING_META_FAILED"),
        }

        match price {
            Ok(price) => {
                if let Some(value) = price.value {
                    result
                        .insights
                        .push(Insight::new("Sample price (USD)", value.to_string()));
                }
            }
            Err(e) => warn!(error = %e, address = %first.address, "LISTING_PRICE_FAILED"),
        }
    }
}

#[async_trait]
impl Service for NewListingsService {
    fn name(&self) -> &str {
        "birdeye:new_listings"
    }

    fn kind(&self) -> IntentKind {
        IntentKind::NewListings
    }

    async fn run(&self, _intent: &Intent, prompt: &str) -> Result<ServiceResult, ServiceError> {
        let items = self.listings.new_listings(self.limit).await?;
        debug!(count = items.len(), backend = self.listings.name(), "LISTINGS_FETCHED");

        let rows: Vec<TableRow> = items
            .iter()
            .map(|item| TableRow::Listing(ListingRow::from(item)))
            .collect();

        let mut result = ServiceResult::new(IntentKind::NewListings);
        let first = items.first().filter(|item| !item.address.is_empty());

        if let Some(first) = first {
            self.sample_insights(first, &mut result).await;
        }

        result = result.insight("Detected intent", "New token listings");
        if self.listings.is_demo() {
            result = result.insight("Source", DEMO_SOURCE);
        }

        let context = format!(
            "User asked: {}. We fetched {} new listings. Fields: symbol, name, address, createdAt, liquidity.",
            prompt,
            rows.len()
        );
        let summary = self.summarizer.summarize(&context).await;
        let summary = if summary.is_fallback() {
            format!("Fetched {} new token listings.", rows.len())
        } else {
            summary.summary
        };

        if let Some(first) = first {
            let symbol = if first.symbol.is_empty() {
                "token"
            } else {
                first.symbol.as_str()
            };
            result.actions.push(Cta::new(
                format!("Get swap quote for {}", symbol),
                CtaAction::SwapQuote(SwapQuoteRequest {
                    input_mint: USDC_MINT.to_string(),
                    output_mint: first.address.clone(),
                    amount: SWAP_QUOTE_AMOUNT.to_string(),
                    slippage_bps: SWAP_QUOTE_SLIPPAGE_BPS,
                }),
            ));
        }

        Ok(result.summary(summary).table(rows))
    }
}
