//! Configuration for the ClaimClassifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the ClaimClassifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Sampling temperature
    pub temperature: f32,

    /// Response token ceiling
    pub max_tokens: u32,

    /// Maximum time for the classification call (seconds)
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 2000,
            timeout_secs: 60,
        }
    }
}

impl ClassifierConfig {
    /// Get the call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 2000);
    }

    #[test]
    fn test_invalid_temperature() {
        let mut config = ClassifierConfig::default();
        config.temperature = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig::default();
        let parsed = ClassifierConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.max_tokens, config.max_tokens);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
    }
}
