//! Domain types returned by market data backends.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field that may be `null`, treating `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A newly listed token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Listing time as reported by the backend.
    #[serde(default, alias = "liquidityAddedAt", deserialize_with = "null_as_default")]
    pub created_at: String,
    /// Liquidity in USD, when known.
    #[serde(default)]
    pub liquidity: Option<f64>,
}

/// Token metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub decimals: u8,
    #[serde(
        default,
        rename = "logoURI",
        alias = "logo_uri",
        deserialize_with = "null_as_default"
    )]
    pub logo_uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
}

/// Spot price of a token in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    #[serde(default)]
    pub address: String,
    /// Price in USD; `None` when the backend has no quote.
    #[serde(default)]
    pub value: Option<f64>,
    /// 24h change in percent.
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    /// Liquidity in USD.
    #[serde(default)]
    pub liquidity: Option<f64>,
    /// Unix seconds of the last update.
    #[serde(default)]
    pub update_unix_time: Option<i64>,
}

/// One ranked holder of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderEntry {
    pub rank: u32,
    pub owner: String,
    pub amount: f64,
    /// Share of circulating supply in percent.
    pub share_pct: Option<f64>,
}

/// Holder ranking for a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoldersPage {
    /// Token the ranking is for, as requested.
    pub token: Option<String>,
    pub holders: Vec<HolderEntry>,
    /// `false` when the backend cannot rank holders yet.
    pub supported: bool,
}

/// Parameters for a swap quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    /// Input amount in base units, as a decimal string.
    pub amount: String,
    pub slippage_bps: u16,
}

/// A swap quote summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub in_amount: String,
    pub out_amount: String,
    pub price_impact_pct: Option<String>,
    pub route_count: usize,
}
