//! Failing brain implementation - every call errors.

use std::sync::atomic::{AtomicUsize, Ordering};

use brain_core::{async_trait, Brain, BrainError, CompletionRequest};

/// A brain whose every call fails.
#[derive(Debug)]
pub struct FailingBrain {
    name: String,
    status: Option<u16>,
    message: String,
    calls: AtomicUsize,
}

impl FailingBrain {
    /// Fail with a provider error carrying the given status.
    pub fn provider(name: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Some(status),
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail with a network error.
    pub fn network(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(match self.status {
            Some(status) => BrainError::Provider {
                status,
                message: self.message.clone(),
            },
            None => BrainError::Network(self.message.clone()),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
