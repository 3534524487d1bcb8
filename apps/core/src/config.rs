//! Runtime configuration.
//!
//! Values come from the process environment, after loading a `.env` file when
//! one is present. The API credential is passed through untouched.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;
use validator::Validate;

use crate::error::AppError;
use crate::models::CompletionSettings;

/// Default chat-completions endpoint (Together AI).
pub const DEFAULT_API_URL: &str = "https://api.together.xyz/v1/chat/completions";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_API_KEY: &str = "TOGETHER_API_KEY";
pub const ENV_API_URL: &str = "SECBOT_API_URL";
pub const ENV_MODEL: &str = "SECBOT_MODEL";
pub const ENV_MAX_TOKENS: &str = "SECBOT_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "SECBOT_TEMPERATURE";
pub const ENV_TOP_P: &str = "SECBOT_TOP_P";
pub const ENV_TIMEOUT_SECS: &str = "SECBOT_TIMEOUT_SECS";

/// Everything the LLM actor needs to reach the completion service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token; requests go out unauthenticated when absent.
    pub api_key: Option<String>,
    pub api_url: String,
    pub completion: CompletionSettings,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            completion: CompletionSettings::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and then read the environment.
    pub fn load() -> Result<Self, AppError> {
        // A missing .env file is normal
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Build the configuration from environment variables only.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let api_key = env::var(ENV_API_KEY).ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("{} is not set, completion requests will be sent without credentials", ENV_API_KEY);
        }

        let completion = CompletionSettings {
            model: env::var(ENV_MODEL).unwrap_or(defaults.completion.model),
            max_tokens: parse_var(ENV_MAX_TOKENS)?.unwrap_or(defaults.completion.max_tokens),
            temperature: parse_var(ENV_TEMPERATURE)?.unwrap_or(defaults.completion.temperature),
            top_p: parse_var(ENV_TOP_P)?.unwrap_or(defaults.completion.top_p),
        };
        completion.validate()?;

        let timeout_secs: u64 = parse_var(ENV_TIMEOUT_SECS)?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Validation(format!(
                "{} must be greater than zero",
                ENV_TIMEOUT_SECS
            )));
        }

        Ok(Self {
            api_key,
            api_url: env::var(ENV_API_URL).unwrap_or(defaults.api_url),
            completion,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Replace the model, keeping every other setting.
    pub fn with_model(mut self, model: impl Into<String>) -> Result<Self, AppError> {
        self.completion.model = model.into();
        self.completion.validate()?;
        Ok(self)
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_MODEL;

    const ALL_VARS: [&str; 7] = [
        ENV_API_KEY,
        ENV_API_URL,
        ENV_MODEL,
        ENV_MAX_TOKENS,
        ENV_TEMPERATURE,
        ENV_TOP_P,
        ENV_TIMEOUT_SECS,
    ];

    /// Every config variable unset except the given overrides.
    fn env_with(
        overrides: &[(&'static str, &'static str)],
    ) -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| *value);
                (*name, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        temp_env::with_vars(env_with(&[]), || {
            let config = AppConfig::from_env().unwrap();
            assert!(config.api_key.is_none());
            assert_eq!(config.api_url, DEFAULT_API_URL);
            assert_eq!(config.completion.model, DEFAULT_MODEL);
            assert_eq!(config.completion.max_tokens, 300);
            assert_eq!(config.completion.temperature, 0.5);
            assert_eq!(config.completion.top_p, 0.9);
            assert_eq!(config.request_timeout, Duration::from_secs(60));
        });
    }

    #[test]
    fn test_environment_overrides() {
        let vars = env_with(&[
            (ENV_API_KEY, "secret"),
            (ENV_API_URL, "http://localhost:9999/v1/chat/completions"),
            (ENV_MODEL, "meta-llama/Llama-3-8b-chat-hf"),
            (ENV_MAX_TOKENS, "512"),
            (ENV_TEMPERATURE, "0.2"),
            (ENV_TOP_P, "1.0"),
            (ENV_TIMEOUT_SECS, "5"),
        ]);
        temp_env::with_vars(vars, || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.api_key.as_deref(), Some("secret"));
            assert_eq!(config.api_url, "http://localhost:9999/v1/chat/completions");
            assert_eq!(config.completion.model, "meta-llama/Llama-3-8b-chat-hf");
            assert_eq!(config.completion.max_tokens, 512);
            assert_eq!(config.completion.temperature, 0.2);
            assert_eq!(config.completion.top_p, 1.0);
            assert_eq!(config.request_timeout, Duration::from_secs(5));
        });
    }

    #[test]
    fn test_blank_api_key_treated_as_missing() {
        let vars = env_with(&[(ENV_API_KEY, "   ")]);
        temp_env::with_vars(vars, || {
            assert!(AppConfig::from_env().unwrap().api_key.is_none());
        });
    }

    #[test]
    fn test_unparseable_number_is_config_error() {
        let vars = env_with(&[(ENV_MAX_TOKENS, "lots")]);
        temp_env::with_vars(vars, || {
            let err = AppConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(err.to_string().contains(ENV_MAX_TOKENS));
        });
    }

    #[test]
    fn test_out_of_range_value_is_validation_error() {
        let vars = env_with(&[(ENV_TEMPERATURE, "3.5")]);
        temp_env::with_vars(vars, || {
            assert!(matches!(
                AppConfig::from_env().unwrap_err(),
                AppError::Validation(_)
            ));
        });
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let vars = env_with(&[(ENV_TIMEOUT_SECS, "0")]);
        temp_env::with_vars(vars, || {
            assert!(AppConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_with_model_override() {
        let config = AppConfig::default().with_model("custom/model").unwrap();
        assert_eq!(config.completion.model, "custom/model");
        assert!(AppConfig::default().with_model("").is_err());
    }
}
