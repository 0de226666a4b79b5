//! Configuration for GeminiBrain.

use brain_core::BrainError;
use std::env;

/// Default Generative Language API URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default classification model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default summary model.
pub const DEFAULT_SUMMARY_MODEL: &str = "gemini-1.5-pro";

/// Configuration for GeminiBrain.
#[derive(Debug, Clone)]
pub struct GeminiBrainConfig {
    /// API base URL.
    pub api_url: String,
    /// API key, sent as `x-goog-api-key`.
    pub api_key: String,
    /// Model used for classification.
    pub model: String,
    /// Model used for summaries.
    pub summary_model: String,
    /// Maximum output tokens.
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            max_output_tokens: None,
        }
    }
}

impl GeminiBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GEMINI_API_KEY` - API key
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - Classification model (default: gemini-1.5-flash)
    /// - `GEMINI_SUMMARY_MODEL` - Summary model (default: gemini-1.5-pro)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = non_empty_var("GEMINI_API_KEY")
            .ok_or_else(|| BrainError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        Ok(Self {
            api_url: non_empty_var("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key,
            model: non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            summary_model: non_empty_var("GEMINI_SUMMARY_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
            max_output_tokens: None,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiBrainConfigBuilder {
        GeminiBrainConfigBuilder::default()
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builder for GeminiBrainConfig.
#[derive(Debug, Default)]
pub struct GeminiBrainConfigBuilder {
    config: GeminiBrainConfig,
}

impl GeminiBrainConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn summary_model(mut self, model: impl Into<String>) -> Self {
        self.config.summary_model = model.into();
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    pub fn build(self) -> GeminiBrainConfig {
        self.config
    }
}
