//! Core trait and types for AI provider brains.
//!
//! This crate provides the shared interface for every AI provider the query
//! router can call. It defines:
//!
//! - [`Brain`] - The trait that all provider implementations must implement
//! - [`CompletionRequest`] / [`CompletionTask`] - What the caller wants completed
//! - [`BrainError`] - Error types for provider calls
//! - [`PromptCache`] - Bounded TTL cache keyed by the literal prompt
//! - [`prompt_version`] / [`versioned_key`] - Cache keys tied to a system instruction
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, Brain, BrainError, CompletionRequest};
//!
//! struct ConstantBrain;
//!
//! #[async_trait]
//! impl Brain for ConstantBrain {
//!     async fn complete(&self, _request: &CompletionRequest) -> Result<String, BrainError> {
//!         Ok(r#"{"kind":"generic"}"#.to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "constant"
//!     }
//! }
//! ```

mod cache;
mod error;
mod prompt;
mod request;
mod trait_def;

pub use cache::{CacheEntry, PromptCache, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
pub use error::BrainError;
pub use prompt::{prompt_version, versioned_key, PROMPT_VERSION_LEN};
pub use request::{CompletionRequest, CompletionTask};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
