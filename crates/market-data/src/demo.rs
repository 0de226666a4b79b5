//! Fixed demo data used when no Birdeye key is configured.

use async_trait::async_trait;

use crate::backend::{ListingsBackend, TokenBackend};
use crate::error::ServiceError;
use crate::tokens::{TokenRegistry, SOL_MINT, USDC_MINT};
use crate::types::{ListingItem, TokenMeta, TokenPrice};

/// Timestamp stamped on demo prices (2024-11-15T00:00:00Z).
const DEMO_UPDATE_TIME: i64 = 1_731_628_800;

/// Offline backend returning a fixed data set.
#[derive(Debug, Clone, Default)]
pub struct DemoBackend {
    registry: TokenRegistry,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn listings() -> Vec<ListingItem> {
        vec![
            ListingItem {
                symbol: "CHILLGUY".to_string(),
                name: "Just a chill guy".to_string(),
                address: "Df6yfrKC8kZE3KNkrHERKzAetSxbrWeniQfyJY4Jpump".to_string(),
                created_at: "2024-11-15T12:00:00".to_string(),
                liquidity: Some(152_340.0),
            },
            ListingItem {
                symbol: "PNUT".to_string(),
                name: "Peanut the Squirrel".to_string(),
                address: "2qEHjDLDLbuBgRYvsxhc5D6uDWAivNFZGan56P1tpump".to_string(),
                created_at: "2024-11-15T11:42:00".to_string(),
                liquidity: Some(98_120.5),
            },
            ListingItem {
                symbol: "GOAT".to_string(),
                name: "Goatseus Maximus".to_string(),
                address: "CzLSujWBLFsSjncfkh59rUFqvafWcY5tzedWJSuypump".to_string(),
                created_at: "2024-11-15T11:05:00".to_string(),
                liquidity: Some(61_004.2),
            },
        ]
    }

    fn price_of(address: &str) -> Option<(f64, f64)> {
        match address {
            SOL_MINT => Some((142.37, 2.15)),
            USDC_MINT => Some((1.0, 0.01)),
            _ => None,
        }
    }
}

#[async_trait]
impl ListingsBackend for DemoBackend {
    async fn new_listings(&self, limit: usize) -> Result<Vec<ListingItem>, ServiceError> {
        Ok(Self::listings().into_iter().take(limit).collect())
    }

    fn name(&self) -> &str {
        "demo"
    }

    fn is_demo(&self) -> bool {
        true
    }
}

#[async_trait]
impl TokenBackend for DemoBackend {
    async fn token_meta(&self, address: &str) -> Result<TokenMeta, ServiceError> {
        let listed = Self::listings().into_iter().find(|item| item.address == address);
        let (symbol, name) = match (listed, self.registry.symbol_for(address)) {
            (Some(item), _) => (item.symbol, item.name),
            (None, Some(symbol)) => (symbol.to_string(), symbol.to_string()),
            (None, None) => (String::new(), String::new()),
        };

        Ok(TokenMeta {
            symbol,
            name,
            address: address.to_string(),
            decimals: if address == SOL_MINT { 9 } else { 6 },
            ..TokenMeta::default()
        })
    }

    async fn token_price(&self, address: &str) -> Result<TokenPrice, ServiceError> {
        let (value, change) = match Self::price_of(address) {
            Some((value, change)) => (Some(value), Some(change)),
            None => (None, None),
        };

        Ok(TokenPrice {
            address: address.to_string(),
            value,
            price_change_24h: change,
            liquidity: None,
            update_unix_time: Some(DEMO_UPDATE_TIME),
        })
    }

    fn name(&self) -> &str {
        "demo"
    }

    fn is_demo(&self) -> bool {
        true
    }
}
