//! Configuration for LLM providers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which provider implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama (`/api/chat`)
    Ollama,
    /// OpenAI-compatible (`/chat/completions`), e.g. Groq
    #[default]
    #[serde(alias = "groq")]
    OpenAi,
    /// Scripted mock, no network
    Mock,
}

/// Provider settings shared by the classifier and synthesizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider implementation
    #[serde(default)]
    pub provider: ProviderKind,

    /// Base URL of the API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token (OpenAI-compatible providers only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for verdict synthesis
    #[serde(default = "default_model")]
    pub model: String,

    /// Cheaper model used for claim classification
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per call; 1 disables retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_endpoint() -> String {
    crate::openai::GROQ_ENDPOINT.to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_fast_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            fast_model: default_fast_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl LlmConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        if self.model.trim().is_empty() || self.fast_model.trim().is_empty() {
            return Err("model names must not be empty".to_string());
        }
        if self.provider != ProviderKind::Mock
            && !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://"))
        {
            return Err(format!("endpoint must be an http(s) URL, got '{}'", self.endpoint));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LlmConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_to_single_attempt() {
        assert_eq!(LlmConfig::default().max_retries, 1);
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = LlmConfig {
            endpoint: "localhost:11434".to_string(),
            ..LlmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml_with_groq_alias() {
        let config: LlmConfig = toml::from_str(
            r#"
            provider = "groq"
            model = "llama-3.3-70b-versatile"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.fast_model, "llama-3.1-8b-instant");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_parse_ollama() {
        let config: LlmConfig = toml::from_str(
            r#"
            provider = "ollama"
            endpoint = "http://localhost:11434"
            model = "llama3"
            fast_model = "llama3"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert!(config.validate().is_ok());
    }
}
