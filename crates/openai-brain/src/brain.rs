//! OpenAiBrain implementation using the chat-completions API.

use brain_core::{async_trait, Brain, BrainError, CompletionRequest, CompletionTask};
use retry_http::{HttpError, HttpRequest, RetryingClient};
use tracing::{debug, info};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};
use crate::config::OpenAiBrainConfig;

/// A brain implementation backed by OpenAI chat completions.
///
/// Each call is a single stateless turn: an optional system message plus
/// the prompt. Classification requests ask for a JSON object.
pub struct OpenAiBrain {
    http: RetryingClient,
    config: OpenAiBrainConfig,
}

impl OpenAiBrain {
    /// Create a new OpenAiBrain with the given configuration.
    pub fn new(config: OpenAiBrainConfig) -> Result<Self, BrainError> {
        let http = RetryingClient::from_reqwest().map_err(|e| {
            BrainError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;
        Self::with_client(config, http)
    }

    /// Create an OpenAiBrain over an existing retrying client.
    pub fn with_client(config: OpenAiBrainConfig, http: RetryingClient) -> Result<Self, BrainError> {
        if !config.is_configured() {
            return Err(BrainError::Configuration("OpenAI API key is empty".to_string()));
        }

        info!(
            model = %config.model,
            summary_model = config.summary_model.as_deref().unwrap_or(&config.model),
            "OPENAI_BRAIN_INIT"
        );

        Ok(Self { http, config })
    }

    /// Create an OpenAiBrain from environment variables.
    ///
    /// See [`OpenAiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(OpenAiBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBrainConfig {
        &self.config
    }

    /// Model used for the given task.
    pub fn model_for(&self, task: CompletionTask) -> &str {
        match task {
            CompletionTask::Summary => self
                .config
                .summary_model
                .as_deref()
                .unwrap_or(&self.config.model),
            CompletionTask::Classification => &self.config.model,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref().filter(|s| !s.is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));

        ChatCompletionRequest {
            model: self.model_for(request.task).to_string(),
            messages,
            temperature: Some(request.task.temperature()),
            max_tokens: self.config.max_tokens,
            response_format: request
                .task
                .wants_json()
                .then(ResponseFormat::json_object),
        }
    }

    /// Make a chat completion request to the OpenAI API.
    async fn chat_completion(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        let request = HttpRequest::post_json(url, body)
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to encode request: {}", e)))?
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header_opt("OpenAI-Organization", self.config.organization.as_deref());

        debug!(model = %body.model, "OPENAI_REQUEST");

        let response = self.http.send(&request).await.map_err(|e| match e {
            HttpError::Transport(msg) => BrainError::Network(msg),
            other => BrainError::ProcessingFailed(other.to_string()),
        })?;

        if !response.is_success() {
            let error_text = response.text();
            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => error_text,
            };
            return Err(BrainError::Provider {
                status: response.status,
                message,
            });
        }

        response
            .json::<ChatCompletionResponse>()
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for OpenAiBrain {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BrainError> {
        let body = self.build_request(request);
        let completion = self.chat_completion(&body).await?;

        if let Some(usage) = &completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "OPENAI_USAGE"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BrainError::InvalidResponse("No content in response".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
