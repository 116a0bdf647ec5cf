//! OpenAI chat-completions adapter for the [`TextGenerator`] port.
//!
//! One outbound HTTP call per generation request; failures map onto the
//! [`GenerationError`] taxonomy and are never retried here (the client SDK
//! owns retry policy). When a request asks for JSON output, the adapter
//! sets `response_format: {"type": "json_object"}` so the model is held to
//! the format contract embedded in the prompt.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// Configuration for the OpenAI generator.
#[derive(Debug, Clone)]
pub struct OpenAiGeneratorConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Default model (e.g., "gpt-4-turbo-preview").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiGeneratorConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4-turbo-preview".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Builds a configuration from the application config.
    ///
    /// Returns `None` when no usable API key is configured.
    pub fn from_app_config(config: &AiConfig) -> Option<Self> {
        let key = config.api_key()?;
        Some(
            Self::new(key)
                .with_model(&config.model)
                .with_base_url(&config.base_url)
                .with_timeout(config.timeout()),
        )
    }

    /// Sets the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-backed text generator.
pub struct OpenAiGenerator {
    config: OpenAiGeneratorConfig,
    client: Client,
}

impl OpenAiGenerator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: OpenAiGeneratorConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts a port request to OpenAI's wire format.
    fn to_wire_request(&self, request: &GenerationRequest) -> ChatRequest {
        ChatRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    /// Sends the request, mapping transport failures.
    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GenerationError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses onto the error taxonomy.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(GenerationError::AuthenticationFailed),
            429 => Err(GenerationError::RateLimited {
                retry_after_secs: Self::parse_retry_after(&error_body),
            }),
            400 => Err(GenerationError::InvalidRequest(error_body)),
            500..=599 => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from an error response body.
    fn parse_retry_after(error_body: &str) -> u32 {
        // OpenAI sometimes includes "try again in Xs" in the message
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(msg) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = msg.find("try again in ") {
                    let rest = &msg[idx + 13..];
                    if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                        if let Ok(secs) = rest[..num_end].parse::<u32>() {
                            return secs;
                        }
                    }
                }
            }
        }
        30 // Default retry after
    }

    /// Extracts the completion text from a successful response.
    async fn parse_response(&self, response: Response) -> Result<String, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::parse("No choices in response"))?;

        Ok(choice.message.content)
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAiGeneratorConfig::new("test-key")
            .with_model("gpt-4-turbo")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(config.model, "gpt-4-turbo");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_from_app_config_requires_key() {
        let ai = AiConfig::default();
        assert!(OpenAiGeneratorConfig::from_app_config(&ai).is_none());

        let ai = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        };
        let config = OpenAiGeneratorConfig::from_app_config(&ai).unwrap();
        assert_eq!(config.api_key(), "sk-xxx");
        assert_eq!(config.model, "gpt-4-turbo-preview");
    }

    #[test]
    fn wire_request_uses_configured_model_by_default() {
        let generator = OpenAiGenerator::new(OpenAiGeneratorConfig::new("k"));
        let wire = generator.to_wire_request(&GenerationRequest::new("hello"));

        assert_eq!(wire.model, "gpt-4-turbo-preview");
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
        assert_eq!(wire.messages[0].content, "hello");
        assert!(wire.response_format.is_none());
    }

    #[test]
    fn wire_request_honors_model_override_and_json_flag() {
        let generator = OpenAiGenerator::new(OpenAiGeneratorConfig::new("k"));
        let request = GenerationRequest::new("hello")
            .with_model("gpt-4-turbo")
            .with_json_output()
            .with_max_tokens(10);
        let wire = generator.to_wire_request(&request);

        assert_eq!(wire.model, "gpt-4-turbo");
        assert_eq!(wire.max_tokens, Some(10));
        assert_eq!(
            wire.response_format.as_ref().map(|f| f.format_type.as_str()),
            Some("json_object")
        );
    }

    #[test]
    fn wire_request_serializes_without_optional_fields() {
        let generator = OpenAiGenerator::new(OpenAiGeneratorConfig::new("k"));
        let wire = generator.to_wire_request(&GenerationRequest::new("hello"));
        let json = serde_json::to_string(&wire).unwrap();

        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("response_format"));
        assert!(json.contains("\"temperature\":0.7"));
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 30 seconds."}}"#;
        assert_eq!(OpenAiGenerator::parse_retry_after(error), 30);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(OpenAiGenerator::parse_retry_after(error), 30);
    }
}
