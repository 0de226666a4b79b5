//! Market data backends for the query router.
//!
//! Each data concern is a trait so services can be tested against stubs:
//!
//! - [`ListingsBackend`] - newly listed tokens
//! - [`TokenBackend`] - token metadata and spot price
//! - [`HoldersBackend`] - top holders of a token
//! - [`QuoteBackend`] - swap quotes
//!
//! Production implementations are [`BirdeyeClient`] (listings, tokens) and
//! [`JupiterClient`] (quotes). [`DemoBackend`] serves fixed data when no
//! Birdeye key is configured, and [`ComingSoonHolders`] stands in for a
//! holder index that does not exist yet.

mod backend;
pub mod birdeye;
mod demo;
mod error;
mod holders;
pub mod jupiter;
pub mod tokens;
mod types;

pub use backend::{HoldersBackend, ListingsBackend, QuoteBackend, TokenBackend};
pub use birdeye::{BirdeyeClient, BirdeyeConfig};
pub use demo::DemoBackend;
pub use error::ServiceError;
pub use holders::ComingSoonHolders;
pub use jupiter::{JupiterClient, JupiterConfig};
pub use tokens::{is_base58_mint, ResolvedToken, TokenRegistry, SOL_MINT, USDC_MINT};
pub use types::{HolderEntry, HoldersPage, ListingItem, SwapQuote, SwapQuoteRequest, TokenMeta, TokenPrice};

// Re-export for implementors
pub use async_trait::async_trait;
