//! Generation provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// OpenAI generation configuration
///
/// A missing API key does not fail validation: the server still boots and
/// every generation route answers with a descriptive 500 instead. This
/// mirrors how the quiz is deployed (key arrives late via the environment).
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Model for question generation and classification
    #[serde(default = "default_model")]
    pub model: String,

    /// Model tier for personalized attribute generation
    #[serde(default = "default_attributes_model")]
    pub attributes_model: String,

    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured and non-empty
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// The usable API key: trimmed, with any leading `Bearer ` stripped.
    ///
    /// Users paste keys with the auth-header prefix often enough that the
    /// original deployment scrubbed it; keep doing so.
    pub fn api_key(&self) -> Option<String> {
        let key = self.openai_api_key.as_deref()?.trim();
        let key = key
            .strip_prefix("Bearer ")
            .or_else(|| key.strip_prefix("bearer "))
            .unwrap_or(key)
            .trim();
        (!key.is_empty()).then(|| key.to_string())
    }

    /// Key length for the health endpoint's env debug block
    pub fn key_length(&self) -> usize {
        self.api_key().map(|k| k.len()).unwrap_or(0)
    }

    /// First four characters of the key for the env debug block
    pub fn key_prefix(&self) -> String {
        self.api_key()
            .map(|k| k.chars().take(4).collect())
            .unwrap_or_default()
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidGenerationTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            attributes_model: default_attributes_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_attributes_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4-turbo-preview");
        assert_eq!(config.attributes_model, "gpt-4-turbo");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_api_key_trims_whitespace() {
        let config = AiConfig {
            openai_api_key: Some("  sk-test-key \n".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_key().as_deref(), Some("sk-test-key"));
    }

    #[test]
    fn test_api_key_strips_bearer_prefix() {
        let config = AiConfig {
            openai_api_key: Some("Bearer sk-test-key".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_key().as_deref(), Some("sk-test-key"));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let config = AiConfig {
            openai_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!config.has_api_key());
        assert_eq!(config.key_length(), 0);
        assert_eq!(config.key_prefix(), "");
    }

    #[test]
    fn test_key_debug_helpers() {
        let config = AiConfig {
            openai_api_key: Some("sk-abcdef".to_string()),
            ..Default::default()
        };
        assert_eq!(config.key_length(), 9);
        assert_eq!(config.key_prefix(), "sk-a");
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_allows_missing_key() {
        let config = AiConfig::default();
        assert!(config.validate().is_ok());
    }
}
