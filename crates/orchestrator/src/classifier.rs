//! Intent classification over a cascade of AI providers.

use std::sync::Arc;

use brain_core::{prompt_version, versioned_key, Brain, BrainError, CompletionRequest, PromptCache};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::intent::{keyword_fallback, Intent};

/// System instruction sent to every classification tier.
pub const CLASSIFY_SYSTEM_PROMPT: &str = r#"Return ONLY compact JSON for one of:
{"kind":"new_listings"}
{"kind":"top_holders","token":"<optional>"}
{"kind":"price","token":"<optional>"}
{"kind":"generic_info"}
{"kind":"generic"}"#;

/// Which part of the cascade produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiSource {
    /// The first configured provider.
    PrimaryProvider,
    /// Any provider after the first.
    SecondaryProvider,
    /// No provider answered; a local rule did.
    Fallback,
}

impl AiSource {
    /// Source label for the tier at `index`.
    pub fn for_tier(index: usize) -> Self {
        if index == 0 {
            Self::PrimaryProvider
        } else {
            Self::SecondaryProvider
        }
    }
}

/// Outcome of classifying one prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub intent: Intent,
    pub source: AiSource,
    /// Name of the provider that answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub latency_ms: u64,
    /// Set when providers were tried and all failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The provider's JSON object as received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// Classifies prompts into intents.
///
/// Tiers are tried in order; the first parsable answer wins. When every
/// tier fails (or none is configured) the keyword fallback decides, so
/// classification never fails.
///
/// Cache keys carry the version of the system instruction, so a classifier
/// with a different instruction never reuses another one's answers.
pub struct IntentClassifier {
    tiers: Vec<Arc<dyn Brain>>,
    cache: Arc<PromptCache<ClassificationResult>>,
    cache_failures: bool,
    system_prompt: String,
    prompt_version: String,
}

impl IntentClassifier {
    /// Create a classifier over the given tiers and cache.
    pub fn new(tiers: Vec<Arc<dyn Brain>>, cache: Arc<PromptCache<ClassificationResult>>) -> Self {
        Self {
            tiers,
            cache,
            cache_failures: true,
            system_prompt: CLASSIFY_SYSTEM_PROMPT.to_string(),
            prompt_version: prompt_version(CLASSIFY_SYSTEM_PROMPT),
        }
    }

    /// Replace the system instruction sent to every tier.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self.prompt_version = prompt_version(&self.system_prompt);
        self
    }

    /// Fingerprint of the system instruction in use.
    pub fn prompt_version(&self) -> &str {
        &self.prompt_version
    }

    /// Whether fallback results caused by provider failures are cached.
    pub fn with_cache_failures(mut self, cache_failures: bool) -> Self {
        self.cache_failures = cache_failures;
        self
    }

    /// Names of the configured tiers, in order.
    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|brain| brain.name()).collect()
    }

    /// The result cache.
    pub fn cache(&self) -> &PromptCache<ClassificationResult> {
        &self.cache
    }

    /// Classify a prompt. Never fails.
    pub async fn classify(&self, prompt: &str) -> ClassificationResult {
        let key = versioned_key(&self.prompt_version, prompt);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(source = ?hit.source, "CLASSIFY_CACHE_HIT");
            return hit;
        }

        let start = Instant::now();
        let request = CompletionRequest::classification(
            self.system_prompt.as_str(),
            format!("Query: {}\nReturn JSON only.", prompt),
        );

        let mut failures = Vec::new();
        for (index, brain) in self.tiers.iter().enumerate() {
            match ask(brain.as_ref(), &request).await {
                Ok((intent, raw)) => {
                    let result = ClassificationResult {
                        intent,
                        source: AiSource::for_tier(index),
                        provider: Some(brain.name().to_string()),
                        latency_ms: elapsed_ms(start),
                        error: None,
                        raw: Some(raw),
                    };
                    info!(
                        provider = brain.name(),
                        tier = index,
                        kind = result.intent.kind(),
                        latency_ms = result.latency_ms,
                        "CLASSIFY_TIER_OK"
                    );
                    self.cache.insert(&key, result.clone()).await;
                    return result;
                }
                Err(e) => {
                    warn!(error = %e, provider = brain.name(), tier = index, "CLASSIFY_TIER_FAILED");
                    failures.push(format!("{}: {}", brain.name(), e));
                }
            }
        }

        let result = ClassificationResult {
            intent: keyword_fallback(prompt),
            source: AiSource::Fallback,
            provider: None,
            latency_ms: elapsed_ms(start),
            error: (!failures.is_empty()).then(|| failures.join("; ")),
            raw: None,
        };
        info!(kind = result.intent.kind(), attempted = failures.len(), "CLASSIFY_FALLBACK");

        if result.error.is_none() || self.cache_failures {
            self.cache.insert(&key, result.clone()).await;
        }
        result
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Ask one tier and parse its reply.
async fn ask(brain: &dyn Brain, request: &CompletionRequest) -> Result<(Intent, Value), BrainError> {
    let reply = brain.complete(request).await?;
    trace!(provider = brain.name(), raw_response = %reply, "CLASSIFY_RAW_RESPONSE");
    parse_intent(&reply)
}

/// Parse a provider reply into an intent and the raw JSON object.
pub fn parse_intent(reply: &str) -> Result<(Intent, Value), BrainError> {
    let json = extract_json(reply);
    let raw: Value = serde_json::from_str(json)
        .map_err(|e| BrainError::InvalidResponse(format!("parse error: {}, response was: {}", e, reply)))?;

    let intent = Intent::from_value(&raw).ok_or_else(|| {
        BrainError::InvalidResponse(format!("no string \"kind\" in response: {}", reply))
    })?;

    Ok((intent, raw))
}

/// Locate the JSON object in a reply that may carry code fences or prose.
pub fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();
    let body = strip_code_fence(trimmed).unwrap_or(trimmed);

    match body.find('{') {
        Some(start) => balanced_object(&body[start..]),
        None => body,
    }
}

/// Contents of the first fenced block, without its language tag.
fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let tag_len = after
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after.len());
    let inner = &after[tag_len..];
    let end = inner.find("```")?;
    Some(inner[..end].trim())
}

/// Cut a string starting with `{` at its matching closing brace.
///
/// Braces inside string literals are ignored. Without a match the input is
/// returned unchanged.
fn balanced_object(s: &str) -> &str {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &s[..=i];
                }
            }
            _ => {}
        }
    }

    s
}
