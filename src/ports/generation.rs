//! Generation port - interface for hosted text-generation providers.
//!
//! Abstracts the model call behind a trait so the pipeline and HTTP layer
//! stay decoupled from any specific provider API. Implementations translate
//! between [`GenerationRequest`] and the provider wire format.
//!
//! Implementations must not cache or retry internally; every failure
//! propagates to the caller as a [`GenerationError`]. Retry policy belongs
//! to the client SDK, not the server side.

use async_trait::async_trait;

/// Port for hosted text-generation calls.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one prompt to the model and returns the raw completion text.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The fully rendered instruction prompt.
    pub prompt: String,
    /// Model override; the provider's configured model is used when `None`.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output length bound, used only by the lightweight connectivity check.
    pub max_tokens: Option<u32>,
    /// Ask the provider to enforce a JSON object response when supported.
    pub json_output: bool,
}

impl GenerationRequest {
    /// Temperature used by every quiz generation call.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Creates a request with the default temperature.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: None,
            json_output: false,
        }
    }

    /// Overrides the model tier for this request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Bounds the output length.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Requests provider-side JSON response enforcement.
    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Generation provider errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// API key rejected by the provider.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable (5xx).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Provider response did not match the expected wire shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
