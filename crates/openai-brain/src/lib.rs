//! OpenAI-based brain implementation.
//!
//! This crate provides a [`Brain`] that completes prompts through the OpenAI
//! chat-completions API. In the query router it is the primary provider for
//! both intent classification and summaries.
//!
//! # Features
//!
//! - Uses `gpt-4o-mini` by default, with an optional separate summary model
//! - JSON-object response format for classification requests
//! - Optional `OpenAI-Organization` header
//! - Retries `429`/`5xx` and transport errors through `retry-http`
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_brain::{Brain, CompletionRequest, OpenAiBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = OpenAiBrain::from_env()?;
//!     let request = CompletionRequest::summary("Be concise.", "What is Solana?");
//!     let text = brain.complete(&request).await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::OpenAiBrain;
pub use config::{OpenAiBrainConfig, OpenAiBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, CompletionRequest, CompletionTask};
