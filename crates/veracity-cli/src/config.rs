//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use veracity_cache::CacheConfig;
use veracity_classifier::ClassifierConfig;
use veracity_llm::LlmConfig;
use veracity_pipeline::PipelineConfig;
use veracity_retrieval::RetrievalConfig;
use veracity_synthesizer::SynthesizerConfig;

/// Environment variables holding the LLM API key, first match wins
const LLM_KEY_VARS: [&str; 2] = ["VERACITY_LLM_API_KEY", "GROQ_API_KEY"];

/// CLI configuration: the pipeline sections plus the cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// LLM provider settings
    pub llm: LlmConfig,

    /// Search backend settings
    pub retrieval: RetrievalConfig,

    /// Claim classifier settings
    pub classifier: ClassifierConfig,

    /// Verdict synthesizer settings
    pub synthesizer: SynthesizerConfig,

    /// Result cache settings
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    ///
    /// Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override secrets and search preference from environment lookups.
    ///
    /// Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = LLM_KEY_VARS.iter().find_map(|name| get(*name)) {
            self.llm.api_key = Some(key);
        }
        if let Some(key) = get("SERPAPI_API_KEY") {
            self.retrieval.serpapi_api_key = Some(key);
        }
        if let Some(key) = get("GOOGLE_API_KEY") {
            self.retrieval.google_api_key = Some(key);
        }
        if let Some(id) = get("GOOGLE_CSE_ID") {
            self.retrieval.google_cse_id = Some(id);
        }
        if let Some(flag) = get("VERACITY_USE_FREE_SEARCH") {
            self.retrieval.use_free_search = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.pipeline().validate().map_err(CliError::Config)?;
        self.cache
            .validate()
            .map_err(|e| CliError::Config(format!("cache: {}", e)))
    }

    /// The pipeline sections.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            llm: self.llm.clone(),
            retrieval: self.retrieval.clone(),
            classifier: self.classifier.clone(),
            synthesizer: self.synthesizer.clone(),
        }
    }

    /// Serialize to TOML, with secrets removed.
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut redacted = self.clone();
        let mask = |value: &mut Option<String>| {
            if value.is_some() {
                *value = Some("********".to_string());
            }
        };
        mask(&mut redacted.llm.api_key);
        mask(&mut redacted.retrieval.serpapi_api_key);
        mask(&mut redacted.retrieval.google_api_key);

        toml::to_string_pretty(&redacted)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}
