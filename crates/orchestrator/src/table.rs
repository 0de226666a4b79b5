//! Typed table rows and their generic field view.

use std::fmt;

use market_data::{HolderEntry, ListingItem, TokenPrice};
use serde::Serialize;

/// A newly listed token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRow {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub created_at: String,
    pub liquidity: Option<f64>,
}

impl From<&ListingItem> for ListingRow {
    fn from(item: &ListingItem) -> Self {
        Self {
            symbol: item.symbol.clone(),
            name: item.name.clone(),
            address: item.address.clone(),
            created_at: item.created_at.clone(),
            liquidity: item.liquidity,
        }
    }
}

/// Spot price of one token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    pub token: String,
    pub price_usd: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub liquidity: Option<f64>,
    /// Unix seconds of the last update.
    pub updated: Option<i64>,
}

impl PriceRow {
    pub fn new(token: impl Into<String>, price: &TokenPrice) -> Self {
        Self {
            token: token.into(),
            price_usd: price.value,
            price_change_24h: price.price_change_24h,
            liquidity: price.liquidity,
            updated: price.update_unix_time,
        }
    }
}

/// One ranked holder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderRow {
    pub rank: u32,
    pub owner: String,
    pub amount: f64,
    pub share_pct: Option<f64>,
}

impl From<&HolderEntry> for HolderRow {
    fn from(entry: &HolderEntry) -> Self {
        Self {
            rank: entry.rank,
            owner: entry.owner.clone(),
            amount: entry.amount,
            share_pct: entry.share_pct,
        }
    }
}

/// A table row. Serializes as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableRow {
    Listing(ListingRow),
    Price(PriceRow),
    Holder(HolderRow),
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Empty,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Empty => Ok(()),
        }
    }
}

fn number(value: Option<f64>) -> FieldValue {
    value.map(FieldValue::Number).unwrap_or(FieldValue::Empty)
}

impl TableRow {
    /// Row schema name.
    pub fn schema(&self) -> &'static str {
        match self {
            Self::Listing(_) => "listing",
            Self::Price(_) => "price",
            Self::Holder(_) => "holder",
        }
    }

    /// The row as ordered `(name, value)` pairs, names matching the JSON keys.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        match self {
            Self::Listing(row) => vec![
                ("symbol", FieldValue::Text(row.symbol.clone())),
                ("name", FieldValue::Text(row.name.clone())),
                ("address", FieldValue::Text(row.address.clone())),
                ("createdAt", FieldValue::Text(row.created_at.clone())),
                ("liquidity", number(row.liquidity)),
            ],
            Self::Price(row) => vec![
                ("token", FieldValue::Text(row.token.clone())),
                ("priceUsd", number(row.price_usd)),
                ("priceChange24h", number(row.price_change_24h)),
                ("liquidity", number(row.liquidity)),
                (
                    "updated",
                    row.updated.map(FieldValue::Integer).unwrap_or(FieldValue::Empty),
                ),
            ],
            Self::Holder(row) => vec![
                ("rank", FieldValue::Integer(i64::from(row.rank))),
                ("owner", FieldValue::Text(row.owner.clone())),
                ("amount", FieldValue::Number(row.amount)),
                ("sharePct", number(row.share_pct)),
            ],
        }
    }
}

/// Render rows as CSV, using the first row's field names as the header.
///
/// Rows are expected to share one schema; extra or missing cells are
/// written as-is.
pub fn to_csv(rows: &[TableRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        first
            .fields()
            .iter()
            .map(|(name, _)| csv_cell(name))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        lines.push(
            row.fields()
                .iter()
                .map(|(_, value)| csv_cell(&value.to_string()))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

fn csv_cell(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
