//! Configuration for OpenAiBrain.

use brain_core::BrainError;
use std::env;

/// Default OpenAI API URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default model for every task.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for OpenAiBrain.
#[derive(Debug, Clone)]
pub struct OpenAiBrainConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Optional organization ID sent as `OpenAI-Organization`.
    pub organization: Option<String>,

    /// Model used for classification (and summaries unless overridden).
    pub model: String,

    /// Optional model used for summaries.
    pub summary_model: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,
}

impl Default for OpenAiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            organization: None,
            model: DEFAULT_MODEL.to_string(),
            summary_model: None,
            max_tokens: Some(512),
        }
    }
}

impl OpenAiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_ORG` - Organization ID
    /// - `OPENAI_MODEL` - Model name (default: gpt-4o-mini)
    /// - `OPENAI_SUMMARY_MODEL` - Model for summaries (default: `OPENAI_MODEL`)
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: 512)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = non_empty_var("OPENAI_API_KEY")
            .ok_or_else(|| BrainError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url = non_empty_var("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let organization = non_empty_var("OPENAI_ORG");
        let model = non_empty_var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let summary_model = non_empty_var("OPENAI_SUMMARY_MODEL");

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(512));

        Ok(Self {
            api_url,
            api_key,
            organization,
            model,
            summary_model,
            max_tokens,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiBrainConfigBuilder {
        OpenAiBrainConfigBuilder::default()
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Read an environment variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builder for OpenAiBrainConfig.
#[derive(Debug, Default)]
pub struct OpenAiBrainConfigBuilder {
    config: OpenAiBrainConfig,
}

impl OpenAiBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the organization ID.
    pub fn organization(mut self, org: impl Into<String>) -> Self {
        self.config.organization = Some(org.into());
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the summary model name.
    pub fn summary_model(mut self, model: impl Into<String>) -> Self {
        self.config.summary_model = Some(model.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiBrainConfig {
        self.config
    }
}
