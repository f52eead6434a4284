//! Configuration for the VerdictSynthesizer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the VerdictSynthesizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Sampling temperature
    pub temperature: f32,

    /// Response token ceiling per claim
    pub max_tokens: u32,

    /// Evidence items shown to the model per claim
    pub max_evidence_items: usize,

    /// Claims verified at once; 1 keeps calls strictly sequential
    pub concurrency: usize,

    /// Maximum time for one claim's call (seconds)
    pub timeout_secs: u64,
}

impl Default for SynthesizerConfig {
    /// Sequential, deterministic
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 1000,
            max_evidence_items: 5,
            concurrency: 1,
            timeout_secs: 60,
        }
    }
}

impl SynthesizerConfig {
    /// Parallel preset: several claims in flight, shorter timeout
    pub fn parallel() -> Self {
        Self {
            concurrency: 4,
            timeout_secs: 30,
            ..Self::default()
        }
    }

    /// Get the per-claim timeout as a Duration
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
        if self.max_evidence_items == 0 {
            return Err("max_evidence_items must be at least 1".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".to_string());
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
