//! General-knowledge answers from the summarizer.

use std::sync::Arc;

use async_trait::async_trait;
use market_data::ServiceError;

use super::{Service, ServiceResult};
use crate::intent::{Intent, IntentKind};
use crate::summarizer::Summarizer;

/// Answers general questions with an AI summary of the prompt.
///
/// A summarizer failure does not fail the request; it is reported through
/// [`ServiceResult::degraded`].
pub struct GenericInfoService {
    summarizer: Arc<Summarizer>,
}

impl GenericInfoService {
    pub fn new(summarizer: Arc<Summarizer>) -> Self {
        Self { summarizer }
    }
}

#[async_trait]
impl Service for GenericInfoService {
    fn name(&self) -> &str {
        "ai:summary"
    }

    fn kind(&self) -> IntentKind {
        IntentKind::GenericInfo
    }

    async fn run(&self, _intent: &Intent, prompt: &str) -> Result<ServiceResult, ServiceError> {
        let summary = self.summarizer.summarize(prompt).await;

        let mut result = ServiceResult::new(IntentKind::GenericInfo)
            .insight("Detected intent", "General knowledge")
            .summary(summary.summary)
            .suggestions(["See SOL price", "New token listings", "Top holders of CHILLGUY"]);
        result.degraded = summary.error;

        Ok(result)
    }
}
