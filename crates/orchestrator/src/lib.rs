//! Query router for Solana questions.
//!
//! This crate provides the [`Orchestrator`], which turns a free-text
//! question into a renderable answer: prose summary, table rows,
//! suggestions and CTA buttons.
//!
//! # Architecture
//!
//! ```text
//! prompt
//!    ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                        │
//! │                                                          │
//! │  1. Classify (cache → provider tiers → keyword fallback) │
//! │         ↓                                                │
//! │  2. Dispatch to the service registered for the kind      │
//! │     • new_listings  → listings backend + summarizer      │
//! │     • top_holders   → holders backend                    │
//! │     • price         → token backend                      │
//! │     • generic_info  → summarizer                         │
//! │     • generic       → static hints                       │
//! │         ↓                                                │
//! │  3. Check the result kind, attach CTAs                   │
//! │         ↓                                                │
//! │  4. Envelope {ok, wallet, data, meta{ai, svc}}           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::from_env()?;
//!
//!     let envelope = orchestrator.route("Price BONK", None).await;
//!     println!("{}", serde_json::to_string_pretty(&envelope)?);
//!     Ok(())
//! }
//! ```

mod actions;
mod classifier;
mod config;
mod ctas;
mod dispatcher;
mod envelope;
mod error;
mod formatting;
mod intent;
mod orchestrator;
mod registry;
mod services;
mod summarizer;
mod table;

// Public exports
pub use actions::{Cta, CtaAction};
pub use classifier::{
    extract_json, parse_intent, AiSource, ClassificationResult, IntentClassifier,
    CLASSIFY_SYSTEM_PROMPT,
};
pub use config::{RouterConfig, RouterConfigBuilder};
pub use ctas::ctas_for;
pub use dispatcher::{Dispatched, Dispatcher, ServiceMeta, UNREGISTERED_SERVICE};
pub use envelope::{EnvelopeData, EnvelopeMeta, RoutedEnvelope};
pub use error::OrchestratorError;
pub use formatting::{format_change, format_compact_usd, format_usd, sanitize_summary};
pub use intent::{keyword_fallback, Intent, IntentKind};
pub use orchestrator::{Backends, Orchestrator};
pub use registry::ServiceRegistry;
pub use services::{
    GenericInfoService, GenericService, Insight, NewListingsService, PriceService, Service,
    ServiceResult, TopHoldersService, DEFAULT_LISTINGS_LIMIT,
};
pub use summarizer::{Summarizer, SummaryResult, NO_SUMMARY, SUMMARY_SYSTEM_PROMPT};
pub use table::{to_csv, FieldValue, HolderRow, ListingRow, PriceRow, TableRow};

// Re-export commonly used types from dependencies
pub use brain_core::{Brain, PromptCache};
pub use market_data::ServiceError;
