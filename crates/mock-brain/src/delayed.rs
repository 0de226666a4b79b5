//! Delayed brain implementation - wraps another brain with artificial delay.

use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, CompletionRequest};
use tokio::time::sleep;

/// A brain that wraps another brain and adds artificial delay.
///
/// Useful for simulating provider latency and overlapping requests.
pub struct DelayedBrain<B: Brain> {
    inner: B,
    delay: Duration,
}

impl<B: Brain> DelayedBrain<B> {
    /// Create a new DelayedBrain wrapping the given brain with the specified delay.
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a brain with a delay in milliseconds.
    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped brain.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

#[async_trait]
impl<B: Brain> Brain for DelayedBrain<B> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BrainError> {
        sleep(self.delay).await;
        self.inner.complete(request).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedBrain;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delayed_brain() {
        let brain = DelayedBrain::with_millis(ScriptedBrain::new("slow").on_summary("done"), 100);

        let start = Instant::now();
        let reply = brain
            .complete(&CompletionRequest::summary("sys", "x"))
            .await
            .unwrap();

        assert_eq!(reply, "done");
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert_eq!(brain.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn test_brain_name_is_inner() {
        let brain = DelayedBrain::with_millis(ScriptedBrain::new("inner"), 0);
        assert_eq!(brain.name(), "inner");
    }
}
