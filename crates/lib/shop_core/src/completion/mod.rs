//! Completion gateway — forwards the augmented conversation to the language
//! model service and relays its reply.
//!
//! The gateway is a trait so the HTTP layer can be exercised with an
//! in-process fake. [`openai::OpenAiCompletion`] is the production
//! implementation.

pub mod openai;

use std::env;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::conversation::ConversationMessage;

pub use openai::OpenAiCompletion;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion service API key is not configured")]
    MissingCredential,

    /// Non-success response. `error` is the upstream `error` member verbatim.
    #[error("Completion service returned {status}")]
    Upstream {
        status: u16,
        error: serde_json::Value,
    },

    #[error("{0}")]
    Transport(String),
}

/// Sends a conversation to a completion service.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Returns the assistant reply for `messages`.
    async fn complete(&self, messages: &[ConversationMessage]) -> Result<String, CompletionError>;
}

/// Connection and model parameters for the completion service.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    /// Bearer credential; `None` makes every call fail before any network I/O.
    pub api_key: Option<String>,
    /// API root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl CompletionSettings {
    /// Reads settings from environment variables.
    ///
    /// | Variable             | Default                     |
    /// |----------------------|-----------------------------|
    /// | `OPENAI_API_KEY`     | unset                       |
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1` |
    /// | `OPENAI_MODEL`       | `gpt-3.5-turbo`             |
    /// | `OPENAI_TEMPERATURE` | `0.5`                       |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source. Empty values count
    /// as unset; an unparsable temperature falls back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let temperature = match var("OPENAI_TEMPERATURE") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid OPENAI_TEMPERATURE, using default");
                DEFAULT_TEMPERATURE
            }),
            None => DEFAULT_TEMPERATURE,
        };

        Self {
            api_key: var("OPENAI_API_KEY"),
            base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_storefront_model() {
        let settings = CompletionSettings::default();
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert!(settings.api_key.is_none());
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn invalid_temperature_falls_back_to_default() {
        let settings = CompletionSettings::from_lookup(lookup(&[("OPENAI_TEMPERATURE", "abc")]));
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let settings = CompletionSettings::from_lookup(lookup(&[("OPENAI_API_KEY", "")]));
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let settings = CompletionSettings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9000/v1"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_TEMPERATURE", "0.2"),
        ]));
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.temperature, 0.2);
    }
}
