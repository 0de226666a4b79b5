//! Spot price for one token.

use std::sync::Arc;

use async_trait::async_trait;
use market_data::{ServiceError, TokenBackend, TokenRegistry};
use tracing::debug;

use super::{Service, ServiceResult, DEMO_SOURCE};
use crate::formatting::{format_change, format_compact_usd, format_usd};
use crate::intent::{Intent, IntentKind};
use crate::table::{PriceRow, TableRow};

/// Looks up the price of the requested token, SOL by default.
pub struct PriceService {
    tokens: Arc<dyn TokenBackend>,
    registry: TokenRegistry,
}

impl PriceService {
    pub fn new(tokens: Arc<dyn TokenBackend>) -> Self {
        Self {
            tokens,
            registry: TokenRegistry::new(),
        }
    }
}

#[async_trait]
impl Service for PriceService {
    fn name(&self) -> &str {
        "birdeye:price"
    }

    fn kind(&self) -> IntentKind {
        IntentKind::Price
    }

    async fn run(&self, intent: &Intent, _prompt: &str) -> Result<ServiceResult, ServiceError> {
        let resolved = self.registry.resolve(intent.token());
        let price = self.tokens.token_price(&resolved.mint).await?;
        debug!(symbol = %resolved.symbol, mint = %resolved.mint, value = ?price.value, "PRICE_FETCHED");

        let mut result = ServiceResult::new(IntentKind::Price)
            .insight("Detected intent", "Price lookup")
            .insight("Token", resolved.symbol.clone());

        if let Some(value) = price.value {
            result = result.insight("Price (USD)", format_usd(value));
        }
        if let Some(change) = price.price_change_24h {
            result = result.insight("24h change", format_change(change));
        }
        if let Some(liquidity) = price.liquidity {
            result = result.insight("Liquidity", format_compact_usd(liquidity));
        }
        if let Some(note) = resolved.note {
            result = result.insight("Note", note);
        }
        if self.tokens.is_demo() {
            result = result.insight("Source", DEMO_SOURCE);
        }

        let summary = match (price.value, price.price_change_24h) {
            (Some(value), Some(change)) => format!(
                "{} is trading at {} ({} over 24h).",
                resolved.symbol,
                format_usd(value),
                format_change(change)
            ),
            (Some(value), None) => format!("{} is trading at {}.", resolved.symbol, format_usd(value)),
            (None, _) => format!("No price available for {}.", resolved.symbol),
        };

        let row = TableRow::Price(PriceRow::new(resolved.symbol, &price));
        Ok(result.summary(summary).table(vec![row]))
    }
}
