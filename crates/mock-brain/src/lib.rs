//! Mock brain implementations for testing the query router.
//!
//! This crate provides test doubles for the `Brain` trait:
//! - `ScriptedBrain` - Replies per task or from a queue, and records calls
//! - `FailingBrain` - Always fails with a configured error
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! For production AI processing, use `openai-brain` or `gemini-brain`.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, CompletionRequest, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = ScriptedBrain::new("primary").on_classification(r#"{"kind":"price"}"#);
//!
//!     let request = CompletionRequest::classification("Return JSON", "price of SOL");
//!     let reply = brain.complete(&request).await?;
//!     assert_eq!(reply, r#"{"kind":"price"}"#);
//!     assert_eq!(brain.call_count(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, CompletionRequest, CompletionTask};

pub use delayed::DelayedBrain;
pub use failing::FailingBrain;
pub use scripted::ScriptedBrain;
