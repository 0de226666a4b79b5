//! Router configuration.

use std::env;
use std::time::Duration;

use brain_core::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use gemini_brain::GeminiBrainConfig;
use market_data::BirdeyeConfig;
use openai_brain::OpenAiBrainConfig;
use retry_http::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};

use crate::classifier::CLASSIFY_SYSTEM_PROMPT;
use crate::services::DEFAULT_LISTINGS_LIMIT;
use crate::summarizer::SUMMARY_SYSTEM_PROMPT;

/// Configuration for the query router.
///
/// The primary provider is OpenAI and the secondary is Gemini; a provider
/// without an API key is left out of the cascade.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// OpenAI settings; `api_key` may be empty.
    pub primary: OpenAiBrainConfig,
    /// Gemini settings; `api_key` may be empty.
    pub secondary: GeminiBrainConfig,
    /// How long classifications and summaries stay cached.
    pub cache_ttl: Duration,
    /// Entries per cache before LRU eviction.
    pub cache_capacity: usize,
    /// Whether fallback results are cached.
    pub cache_failures: bool,
    /// System instruction for classification; also versions its cache keys.
    pub classify_prompt: String,
    /// System instruction for summaries; also versions its cache keys.
    pub summary_prompt: String,
    /// Total HTTP attempts per outbound call.
    pub retry_attempts: u32,
    /// Delay before the first retry; doubles each time.
    pub retry_base_delay: Duration,
    /// Birdeye settings; without a key the demo backend is used.
    pub birdeye: BirdeyeConfig,
    /// New listings page size.
    pub listings_limit: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            primary: OpenAiBrainConfig::default(),
            secondary: GeminiBrainConfig::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_failures: true,
            classify_prompt: CLASSIFY_SYSTEM_PROMPT.to_string(),
            summary_prompt: SUMMARY_SYSTEM_PROMPT.to_string(),
            retry_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_delay: DEFAULT_BASE_DELAY,
            birdeye: BirdeyeConfig::default(),
            listings_limit: DEFAULT_LISTINGS_LIMIT,
        }
    }
}

impl RouterConfig {
    /// Create configuration from environment variables.
    ///
    /// Provider variables:
    /// - `OPENAI_API_KEY`, `OPENAI_API_URL`, `OPENAI_ORG`, `OPENAI_MODEL`,
    ///   `OPENAI_SUMMARY_MODEL`
    /// - `GEMINI_API_KEY`, `GEMINI_API_URL`, `GEMINI_MODEL`,
    ///   `GEMINI_SUMMARY_MODEL`
    /// - `BIRDEYE_API_KEY`, `BIRDEYE_API_URL`
    ///
    /// Router variables:
    /// - `SOLGO_CACHE_TTL_MS` (default: 120000)
    /// - `SOLGO_CACHE_CAPACITY` (default: 1024)
    /// - `SOLGO_CACHE_FAILURES` (default: true)
    /// - `SOLGO_RETRY_ATTEMPTS` (default: 3)
    /// - `SOLGO_RETRY_BASE_DELAY_MS` (default: 600)
    /// - `SOLGO_LISTINGS_LIMIT` (default: 10)
    /// - `SOLGO_CLASSIFY_PROMPT`, `SOLGO_SUMMARY_PROMPT` (default: built-in
    ///   instructions)
    ///
    /// Missing provider keys are not an error. Unparsable numbers fall back
    /// to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let primary = OpenAiBrainConfig::from_env().unwrap_or_default();
        let secondary = GeminiBrainConfig::from_env().unwrap_or_default();

        let cache_ttl = parse_var::<u64>("SOLGO_CACHE_TTL_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.cache_ttl);
        let cache_capacity = parse_var("SOLGO_CACHE_CAPACITY").unwrap_or(defaults.cache_capacity);
        let cache_failures = non_empty_var("SOLGO_CACHE_FAILURES")
            .map(|v| parse_bool(&v))
            .unwrap_or(defaults.cache_failures);
        let retry_attempts = parse_var("SOLGO_RETRY_ATTEMPTS").unwrap_or(defaults.retry_attempts);
        let retry_base_delay = parse_var::<u64>("SOLGO_RETRY_BASE_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_base_delay);
        let listings_limit = parse_var("SOLGO_LISTINGS_LIMIT").unwrap_or(defaults.listings_limit);
        let classify_prompt = non_empty_var("SOLGO_CLASSIFY_PROMPT").unwrap_or(defaults.classify_prompt);
        let summary_prompt = non_empty_var("SOLGO_SUMMARY_PROMPT").unwrap_or(defaults.summary_prompt);

        Self {
            primary,
            secondary,
            cache_ttl,
            cache_capacity,
            cache_failures,
            classify_prompt,
            summary_prompt,
            retry_attempts,
            retry_base_delay,
            birdeye: BirdeyeConfig::from_env(),
            listings_limit,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::default()
    }

    /// Retry policy for every outbound HTTP call.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, self.retry_base_delay)
    }

    pub fn primary_api_key(&self) -> Option<&str> {
        Some(self.primary.api_key.as_str()).filter(|k| !k.trim().is_empty())
    }

    pub fn secondary_api_key(&self) -> Option<&str> {
        Some(self.secondary.api_key.as_str()).filter(|k| !k.trim().is_empty())
    }

    pub fn primary_model(&self) -> &str {
        &self.primary.model
    }

    pub fn secondary_model(&self) -> &str {
        &self.secondary.model
    }

    pub fn birdeye_api_key(&self) -> Option<&str> {
        self.birdeye.api_key.as_deref()
    }
}

/// Builder for RouterConfig.
#[derive(Debug, Default)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
    pub fn primary_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.primary.api_key = key.into();
        self
    }

    pub fn primary_model(mut self, model: impl Into<String>) -> Self {
        self.config.primary.model = model.into();
        self
    }

    pub fn primary_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.primary.api_url = url.into();
        self
    }

    pub fn secondary_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.secondary.api_key = key.into();
        self
    }

    pub fn secondary_model(mut self, model: impl Into<String>) -> Self {
        self.config.secondary.model = model.into();
        self
    }

    pub fn secondary_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.secondary.api_url = url.into();
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache_ttl = ttl;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    pub fn cache_failures(mut self, enabled: bool) -> Self {
        self.config.cache_failures = enabled;
        self
    }

    pub fn classify_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.classify_prompt = prompt.into();
        self
    }

    pub fn summary_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.summary_prompt = prompt.into();
        self
    }

    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.config.retry_attempts = attempts;
        self
    }

    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.config.retry_base_delay = delay;
        self
    }

    pub fn birdeye_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.birdeye.api_key = Some(key.into());
        self
    }

    pub fn birdeye_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.birdeye.api_url = url.into();
        self
    }

    pub fn listings_limit(mut self, limit: usize) -> Self {
        self.config.listings_limit = limit;
        self
    }

    pub fn build(self) -> RouterConfig {
        self.config
    }
}

/// Read an environment variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|v| v.parse().ok())
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(120));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(600));
        assert_eq!(config.listings_limit, 10);
        assert!(config.cache_failures);
        assert_eq!(config.classify_prompt, CLASSIFY_SYSTEM_PROMPT);
        assert_eq!(config.summary_prompt, SUMMARY_SYSTEM_PROMPT);
        assert!(config.primary_api_key().is_none());
        assert!(config.secondary_api_key().is_none());
        assert!(config.birdeye_api_key().is_none());
    }

    #[test]
    fn test_builder() {
        let config = RouterConfig::builder()
            .primary_api_key("sk-test")
            .primary_model("gpt-4o")
            .secondary_api_key("g-test")
            .cache_failures(false)
            .retry_attempts(5)
            .retry_base_delay(Duration::from_millis(10))
            .listings_limit(25)
            .build();

        assert_eq!(config.primary_api_key(), Some("sk-test"));
        assert_eq!(config.primary_model(), "gpt-4o");
        assert_eq!(config.secondary_api_key(), Some("g-test"));
        assert!(!config.cache_failures);
        assert_eq!(
            config.retry_policy(),
            RetryPolicy::new(5, Duration::from_millis(10))
        );
        assert_eq!(config.listings_limit, 25);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        const VARS: [&str; 10] = [
            "OPENAI_API_KEY",
            "GEMINI_API_KEY",
            "BIRDEYE_API_KEY",
            "SOLGO_CACHE_TTL_MS",
            "SOLGO_CACHE_CAPACITY",
            "SOLGO_CACHE_FAILURES",
            "SOLGO_RETRY_ATTEMPTS",
            "SOLGO_RETRY_BASE_DELAY_MS",
            "SOLGO_LISTINGS_LIMIT",
            "SOLGO_CLASSIFY_PROMPT",
        ];
        let clear = || VARS.iter().for_each(|name| std::env::remove_var(name));

        // Scenario 1: nothing set, no error and no providers
        clear();
        let config = RouterConfig::from_env();
        assert!(config.primary_api_key().is_none());
        assert!(config.secondary_api_key().is_none());
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);

        // Scenario 2: everything set
        std::env::set_var("OPENAI_API_KEY", "sk-env");
        std::env::set_var("GEMINI_API_KEY", "g-env");
        std::env::set_var("BIRDEYE_API_KEY", "b-env");
        std::env::set_var("SOLGO_CACHE_TTL_MS", "5000");
        std::env::set_var("SOLGO_CACHE_CAPACITY", "64");
        std::env::set_var("SOLGO_CACHE_FAILURES", "false");
        std::env::set_var("SOLGO_RETRY_ATTEMPTS", "2");
        std::env::set_var("SOLGO_RETRY_BASE_DELAY_MS", "100");
        std::env::set_var("SOLGO_LISTINGS_LIMIT", "5");
        std::env::set_var("SOLGO_CLASSIFY_PROMPT", "Return JSON with kind.");
        let config = RouterConfig::from_env();
        assert_eq!(config.classify_prompt, "Return JSON with kind.");
        assert_eq!(config.summary_prompt, SUMMARY_SYSTEM_PROMPT);
        assert_eq!(config.primary_api_key(), Some("sk-env"));
        assert_eq!(config.secondary_api_key(), Some("g-env"));
        assert_eq!(config.birdeye_api_key(), Some("b-env"));
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.cache_capacity, 64);
        assert!(!config.cache_failures);
        assert_eq!(config.retry_attempts, 2);
        assert_eq!(config.retry_base_delay, Duration::from_millis(100));
        assert_eq!(config.listings_limit, 5);

        // Scenario 3: garbage numbers fall back to defaults
        std::env::set_var("SOLGO_CACHE_CAPACITY", "lots");
        let config = RouterConfig::from_env();
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);

        clear();
    }
}
