//! Prose summaries over the same provider cascade as classification.

use std::sync::Arc;

use brain_core::{prompt_version, versioned_key, Brain, CompletionRequest, PromptCache};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::classifier::AiSource;
use crate::formatting::sanitize_summary;

/// System instruction sent to every summary tier.
pub const SUMMARY_SYSTEM_PROMPT: &str =
    "Write a concise answer (80–160 words), neutral, concrete. No fluff. No code.";

/// Summary text used when no provider produced one.
pub const NO_SUMMARY: &str = "No summary available.";

/// Outcome of one summary request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    pub source: AiSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub latency_ms: u64,
    /// Set whenever the summary is the fallback sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResult {
    /// Whether no provider produced this summary.
    pub fn is_fallback(&self) -> bool {
        self.source == AiSource::Fallback
    }
}

/// Produces sanitized summaries, caching them by exact input text.
pub struct Summarizer {
    tiers: Vec<Arc<dyn Brain>>,
    cache: Arc<PromptCache<SummaryResult>>,
    cache_failures: bool,
    system_prompt: String,
    prompt_version: String,
}

impl Summarizer {
    pub fn new(tiers: Vec<Arc<dyn Brain>>, cache: Arc<PromptCache<SummaryResult>>) -> Self {
        Self {
            tiers,
            cache,
            cache_failures: true,
            system_prompt: SUMMARY_SYSTEM_PROMPT.to_string(),
            prompt_version: prompt_version(SUMMARY_SYSTEM_PROMPT),
        }
    }

    /// Replace the summary instruction. Cached summaries made under another
    /// instruction are not reused.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self.prompt_version = prompt_version(&self.system_prompt);
        self
    }

    pub fn prompt_version(&self) -> &str {
        &self.prompt_version
    }

    /// Whether fallback summaries are cached.
    pub fn with_cache_failures(mut self, cache_failures: bool) -> Self {
        self.cache_failures = cache_failures;
        self
    }

    /// The result cache.
    pub fn cache(&self) -> &PromptCache<SummaryResult> {
        &self.cache
    }

    /// Summarize `text`. Never fails; see [`SummaryResult::error`].
    pub async fn summarize(&self, text: &str) -> SummaryResult {
        let key = versioned_key(&self.prompt_version, text);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(source = ?hit.source, "SUMMARY_CACHE_HIT");
            return hit;
        }

        let start = Instant::now();
        let request = CompletionRequest::summary(self.system_prompt.as_str(), text);
        let mut failures = Vec::new();

        for (index, brain) in self.tiers.iter().enumerate() {
            let outcome = brain
                .complete(&request)
                .await
                .map(|reply| sanitize_summary(&reply))
                .map_err(|e| e.to_string())
                .and_then(|summary| {
                    if summary.is_empty() {
                        Err("empty summary".to_string())
                    } else {
                        Ok(summary)
                    }
                });

            match outcome {
                Ok(summary) => {
                    let result = SummaryResult {
                        summary,
                        source: AiSource::for_tier(index),
                        provider: Some(brain.name().to_string()),
                        latency_ms: start.elapsed().as_millis() as u64,
                        error: None,
                    };
                    info!(provider = brain.name(), tier = index, latency_ms = result.latency_ms, "SUMMARY_TIER_OK");
                    self.cache.insert(&key, result.clone()).await;
                    return result;
                }
                Err(e) => {
                    warn!(error = %e, provider = brain.name(), tier = index, "SUMMARY_TIER_FAILED");
                    failures.push(format!("{}: {}", brain.name(), e));
                }
            }
        }

        let error = if failures.is_empty() {
            "no summary provider configured".to_string()
        } else {
            failures.join("; ")
        };

        let result = SummaryResult {
            summary: NO_SUMMARY.to_string(),
            source: AiSource::Fallback,
            provider: None,
            latency_ms: start.elapsed().as_millis() as u64,
            error: Some(error),
        };

        if self.cache_failures {
            self.cache.insert(&key, result.clone()).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::CompletionTask;
    use mock_brain::{FailingBrain, ScriptedBrain};
    use std::time::Duration;

    fn cache() -> Arc<PromptCache<SummaryResult>> {
        Arc::new(PromptCache::new(16, Duration::from_secs(120)))
    }

    #[tokio::test]
    async fn test_no_tiers_returns_sentinel() {
        let summarizer = Summarizer::new(Vec::new(), cache());
        let result = summarizer.summarize("What is Solana?").await;

        assert_eq!(result.summary, NO_SUMMARY);
        assert!(result.is_fallback());
        assert_eq!(result.error.as_deref(), Some("no summary provider configured"));
    }

    #[tokio::test]
    async fn test_summary_is_sanitized() {
        let brain = Arc::new(ScriptedBrain::new("openai").on_summary("**Solana** is a _fast_ chain.\n\n\n\n# Fees\nLow."));
        let summarizer = Summarizer::new(vec![brain.clone()], cache());

        let result = summarizer.summarize("What is Solana?").await;

        assert_eq!(result.summary, "Solana is a fast chain.\n\n Fees\nLow.");
        assert_eq!(result.source, AiSource::PrimaryProvider);
        assert_eq!(result.provider.as_deref(), Some("openai"));
        assert_eq!(brain.calls_for(CompletionTask::Summary), 1);
        assert_eq!(brain.requests()[0].system.as_deref(), Some(SUMMARY_SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn test_falls_through_to_secondary() {
        let primary = Arc::new(FailingBrain::provider("openai", 429, "rate limited"));
        let secondary = Arc::new(ScriptedBrain::new("gemini").on_summary("Solana is fast."));
        let summarizer = Summarizer::new(vec![primary, secondary], cache());

        let result = summarizer.summarize("What is Solana?").await;

        assert_eq!(result.summary, "Solana is fast.");
        assert_eq!(result.source, AiSource::SecondaryProvider);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_after_sanitize_is_failure() {
        let primary = Arc::new(ScriptedBrain::new("openai").on_summary("***"));
        let summarizer = Summarizer::new(vec![primary], cache());

        let result = summarizer.summarize("x").await;
        assert!(result.is_fallback());
        assert_eq!(result.error.as_deref(), Some("openai: empty summary"));
    }

    #[tokio::test]
    async fn test_total_failure_cached_by_default() {
        let primary = Arc::new(FailingBrain::network("openai", "timeout"));
        let summarizer = Summarizer::new(vec![primary.clone()], cache());

        let first = summarizer.summarize("x").await;
        let second = summarizer.summarize("x").await;

        assert_eq!(first, second);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(first.error.as_deref(), Some("openai: network error: timeout"));
    }

    #[tokio::test]
    async fn test_total_failure_not_cached_when_disabled() {
        let primary = Arc::new(FailingBrain::network("openai", "timeout"));
        let summarizer =
            Summarizer::new(vec![primary.clone()], cache()).with_cache_failures(false);

        summarizer.summarize("x").await;
        summarizer.summarize("x").await;
        assert_eq!(primary.call_count(), 2);
    }
}
