//! Narration service configuration loaded from the environment.

use thiserror::Error;

/// Environment variable holding the narration service credential.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";
/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "DOCSKETCH_MODEL";
/// Environment variable overriding the chat-completions endpoint.
pub const ENDPOINT_VAR: &str = "DOCSKETCH_ENDPOINT";
/// Environment variable capping generated tokens.
pub const MAX_TOKENS_VAR: &str = "DOCSKETCH_MAX_TOKENS";

/// Model used when [`MODEL_VAR`] is unset.
pub const DEFAULT_MODEL: &str = "llama-3.2-1b-preview";
/// Endpoint used when [`ENDPOINT_VAR`] is unset.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The API credential is not set or is blank.
    #[error("GROQ_API_KEY is not set; add it to the environment or a .env file")]
    MissingApiKey,

    /// A numeric setting could not be parsed.
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
}

/// Settings for talking to the narration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationConfig {
    /// Bearer credential.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Chat-completions URL.
    pub endpoint: String,
    /// Optional cap on generated tokens.
    pub max_tokens: Option<u32>,
}

impl NarrationConfig {
    /// Load configuration from the process environment.
    ///
    /// Callers are expected to have run `dotenvy::dotenv()` first so that a
    /// local `.env` file can supply the values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no credential is present and
    /// [`ConfigError::InvalidNumber`] for a malformed token cap.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`NarrationConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let model = non_blank(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint = non_blank(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let max_tokens = match non_blank(MAX_TOKENS_VAR) {
            None => None,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err(ConfigError::InvalidNumber { var: MAX_TOKENS_VAR, value: raw }),
            },
        };

        Ok(Self { api_key, model, endpoint, max_tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = NarrationConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = NarrationConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = NarrationConfig::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_tokens, None);
    }

    #[test]
    fn overrides_are_honoured() {
        let config = NarrationConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, "other-model"),
            (ENDPOINT_VAR, "http://localhost:9999/v1/chat/completions"),
            (MAX_TOKENS_VAR, "2048"),
        ]))
        .unwrap();
        assert_eq!(config.model, "other-model");
        assert_eq!(config.endpoint, "http://localhost:9999/v1/chat/completions");
        assert_eq!(config.max_tokens, Some(2048));
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let err = NarrationConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MAX_TOKENS_VAR, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: MAX_TOKENS_VAR, .. }));
    }
}
