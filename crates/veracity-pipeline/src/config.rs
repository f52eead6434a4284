//! Configuration for the whole pipeline

use serde::{Deserialize, Serialize};
use veracity_classifier::ClassifierConfig;
use veracity_llm::LlmConfig;
use veracity_retrieval::RetrievalConfig;
use veracity_synthesizer::SynthesizerConfig;

/// Per-stage settings, one TOML table each
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// `[llm]`
    pub llm: LlmConfig,
    /// `[retrieval]`
    pub retrieval: RetrievalConfig,
    /// `[classifier]`
    pub classifier: ClassifierConfig,
    /// `[synthesizer]`
    pub synthesizer: SynthesizerConfig,
}

impl PipelineConfig {
    /// Validate every section, prefixing errors with the section name
    pub fn validate(&self) -> Result<(), String> {
        self.llm.validate().map_err(|e| format!("llm: {}", e))?;
        self.retrieval.validate().map_err(|e| format!("retrieval: {}", e))?;
        self.classifier.validate().map_err(|e| format!("classifier: {}", e))?;
        self.synthesizer.validate().map_err(|e| format!("synthesizer: {}", e))?;
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
