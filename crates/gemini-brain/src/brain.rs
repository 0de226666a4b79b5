//! GeminiBrain implementation using `generateContent`.

use brain_core::{async_trait, Brain, BrainError, CompletionRequest, CompletionTask};
use retry_http::{HttpError, HttpRequest, RetryingClient};
use tracing::{debug, info};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiBrainConfig;

/// A brain implementation backed by Google Gemini.
pub struct GeminiBrain {
    http: RetryingClient,
    config: GeminiBrainConfig,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, BrainError> {
        let http = RetryingClient::from_reqwest().map_err(|e| {
            BrainError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;
        Self::with_client(config, http)
    }

    /// Create a GeminiBrain over an existing retrying client.
    pub fn with_client(config: GeminiBrainConfig, http: RetryingClient) -> Result<Self, BrainError> {
        if !config.is_configured() {
            return Err(BrainError::Configuration("Gemini API key is empty".to_string()));
        }

        info!(
            model = %config.model,
            summary_model = %config.summary_model,
            "GEMINI_BRAIN_INIT"
        );

        Ok(Self { http, config })
    }

    /// Create a GeminiBrain from environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(GeminiBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiBrainConfig {
        &self.config
    }

    /// Model used for the given task.
    pub fn model_for(&self, task: CompletionTask) -> &str {
        match task {
            CompletionTask::Classification => &self.config.model,
            CompletionTask::Summary => &self.config.summary_model,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: request
                .system
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(Content::system),
            contents: vec![Content::user(request.prompt.clone())],
            generation_config: GenerationConfig {
                temperature: request.task.temperature(),
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: request
                    .task
                    .wants_json()
                    .then(|| "application/json".to_string()),
            },
        }
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, BrainError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            model
        );

        let request = HttpRequest::post_json(url, body)
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to encode request: {}", e)))?
            .header("x-goog-api-key", self.config.api_key.clone());

        debug!(model, "GEMINI_REQUEST");

        let response = self.http.send(&request).await.map_err(|e| match e {
            HttpError::Transport(msg) => BrainError::Network(msg),
            other => BrainError::ProcessingFailed(other.to_string()),
        })?;

        if !response.is_success() {
            let error_text = response.text();
            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => format!("Gemini {}", response.status),
            };
            return Err(BrainError::Provider {
                status: response.status,
                message,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for GeminiBrain {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BrainError> {
        let model = self.model_for(request.task).to_string();
        let body = self.build_request(request);
        let response = self.generate(&model, &body).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                candidate_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "GEMINI_USAGE"
            );
        }

        response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.text().trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| BrainError::InvalidResponse("No candidate text in response".to_string()))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retry_http::{ReqwestTransport, RetryPolicy};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn brain_for(server: &MockServer) -> GeminiBrain {
        let http = RetryingClient::with_policy(
            Arc::new(ReqwestTransport::new().unwrap()),
            RetryPolicy::new(2, Duration::from_millis(5)),
        );
        let config = GeminiBrainConfig::builder()
            .api_key("g-key")
            .api_url(server.uri())
            .build();
        GeminiBrain::with_client(config, http).unwrap()
    }

    fn candidate(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn test_build_request_shapes() {
        let http = RetryingClient::from_reqwest().unwrap();
        let brain =
            GeminiBrain::with_client(GeminiBrainConfig::builder().api_key("k").build(), http)
                .unwrap();

        let body = serde_json::to_value(
            brain.build_request(&CompletionRequest::classification("sys", "Query: x")),
        )
        .unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");

        let summary = serde_json::to_value(
            brain.build_request(&CompletionRequest::summary("sys", "text")),
        )
        .unwrap();
        assert!(summary["generationConfig"].get("responseMimeType").is_none());
    }

    #[tokio::test]
    async fn test_classification_uses_classification_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(json!({ "generationConfig": { "temperature": 0.0 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{\"kind\":\"new_listings\"}")))
            .expect(1)
            .mount(&server)
            .await;

        let brain = brain_for(&server);
        let text = brain
            .complete(&CompletionRequest::classification("sys", "Query: new tokens"))
            .await
            .unwrap();
        assert_eq!(text, "{\"kind\":\"new_listings\"}");
    }

    #[tokio::test]
    async fn test_summary_uses_summary_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate(" Solana is fast. ")))
            .expect(1)
            .mount(&server)
            .await;

        let brain = brain_for(&server);
        let text = brain
            .complete(&CompletionRequest::summary("sys", "What is Solana?"))
            .await
            .unwrap();
        assert_eq!(text, "Solana is fast.");
    }

    #[tokio::test]
    async fn test_error_status_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let brain = brain_for(&server);
        let err = brain
            .complete(&CompletionRequest::summary("sys", "x"))
            .await
            .unwrap_err();

        match err {
            BrainError::Provider { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Gemini 403");
            }
            other => panic!("Expected Provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let brain = brain_for(&server);
        let err = brain
            .complete(&CompletionRequest::classification("sys", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, BrainError::InvalidResponse(_)));
    }
}
