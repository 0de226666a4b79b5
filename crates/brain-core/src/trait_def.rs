//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::request::CompletionRequest;

/// An AI provider that can complete a prompt.
///
/// Implementations range from hosted chat APIs to scripted test doubles.
/// This trait is object-safe and is used as `Arc<dyn Brain>` in the
/// classification and summary cascades.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Complete the request and return the raw reply text.
    ///
    /// Errors are recoverable from the caller's point of view: the cascade
    /// moves on to the next provider.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BrainError>;

    /// Short provider name used in logs and result metadata.
    fn name(&self) -> &str;

    /// Check if the brain is ready to take requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
