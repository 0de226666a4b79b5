//! Gemini-based brain implementation.
//!
//! Completes prompts through the Google Generative Language
//! `generateContent` endpoint. The query router uses it as the secondary
//! provider when OpenAI fails or is not configured.

mod api_types;
mod brain;
mod config;

pub use brain::GeminiBrain;
pub use config::{GeminiBrainConfig, GeminiBrainConfigBuilder};

pub use brain_core::{async_trait, Brain, BrainError, CompletionRequest, CompletionTask};
