//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `TECHNOTYPE`
//! prefix and nested sections use double underscores as separators.
//!
//! For compatibility with existing deployments, the bare `OPENAI_API_KEY`
//! and `PORT` variables are also honored when the prefixed forms are unset.
//!
//! # Example
//!
//! ```no_run
//! use technotype::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, timeouts, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads a `.env` file if present (for development)
    /// 2. Reads environment variables with the `TECHNOTYPE` prefix,
    ///    `__` separating nested values
    /// 3. Falls back to the bare `OPENAI_API_KEY` / `PORT` variables
    ///
    /// # Environment Variable Format
    ///
    /// - `TECHNOTYPE__SERVER__PORT=3001` -> `server.port = 3001`
    /// - `TECHNOTYPE__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TECHNOTYPE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        // Unprefixed fallbacks used by the original deployment shapes
        if config.ai.openai_api_key.is_none() {
            config.ai.openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("TECHNOTYPE__SERVER__PORT");
        env::remove_var("TECHNOTYPE__AI__OPENAI_API_KEY");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("PORT");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 3001);
        assert!(!config.ai.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_prefixed_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TECHNOTYPE__SERVER__PORT", "4000");
        env::set_var("TECHNOTYPE__AI__OPENAI_API_KEY", "sk-prefixed");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.ai.api_key().as_deref(), Some("sk-prefixed"));
    }

    #[test]
    fn test_load_bare_fallbacks() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-bare");
        env::set_var("PORT", "5000");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.ai.api_key().as_deref(), Some("sk-bare"));
    }

    #[test]
    fn test_prefixed_key_wins_over_bare() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TECHNOTYPE__AI__OPENAI_API_KEY", "sk-prefixed");
        env::set_var("OPENAI_API_KEY", "sk-bare");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.ai.api_key().as_deref(), Some("sk-prefixed"));
    }
}
