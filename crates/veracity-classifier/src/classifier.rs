//! Core ClaimClassifier implementation

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_classifications;
use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use veracity_domain::text::preview;
use veracity_domain::{Claim, Classification, CompletionRequest, LlmProvider};

/// Filters claims down to the verifiable ones
pub struct ClaimClassifier<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ClassifierConfig,
}

impl<L> ClaimClassifier<L>
where
    L: LlmProvider,
{
    /// Create a new ClaimClassifier
    pub fn new(llm_provider: L, config: ClassifierConfig) -> Self {
        Self::with_shared(Arc::new(llm_provider), config)
    }

    /// Create a ClaimClassifier over a shared provider
    pub fn with_shared(llm_provider: Arc<L>, config: ClassifierConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Model answering classification calls
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Keep only verifiable claims
    ///
    /// On success every input claim is annotated in place with its resolved
    /// `is_verifiable` and the returned list holds those resolved `true`, in
    /// input order. On any failure the input is left untouched and returned
    /// in full.
    pub async fn filter(&self, claims: &mut [Claim]) -> Vec<Claim> {
        if claims.is_empty() {
            return Vec::new();
        }

        info!("Classifying {} claims", claims.len());

        let classifications = match self.classify_batch(claims).await {
            Ok(classifications) => classifications,
            Err(e) => {
                warn!("Classification failed, keeping all {} claims: {}", claims.len(), e);
                return claims.to_vec();
            }
        };

        let resolution = Resolution::from_classifications(&classifications);
        let mut kept = Vec::new();
        for claim in claims.iter_mut() {
            let verifiable = resolution.is_verifiable(&claim.id);
            claim.is_verifiable = Some(verifiable);
            if verifiable {
                kept.push(claim.clone());
            }
        }

        info!("Claims classified: {} total, {} verifiable", claims.len(), kept.len());
        kept
    }

    async fn classify_batch(&self, claims: &[Claim]) -> Result<Vec<Classification>, ClassifierError> {
        let prompt = PromptBuilder::new(claims).build();
        debug!("Classification prompt length: {} chars", prompt.len());

        let request = CompletionRequest::new(SYSTEM_PROMPT, prompt, self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let response = timeout(self.config.timeout(), self.llm_provider.complete(&request))
            .await
            .map_err(|_| ClassifierError::Timeout)?
            .map_err(|e| ClassifierError::Llm(e.to_string()))?;

        parse_classifications(&response).inspect_err(|e| {
            warn!("Unparseable classifier response ({}): {}", e, preview(&response, 200));
        })
    }
}

/// Claim ids the model marked verifiable and not verifiable
struct Resolution<'a> {
    verifiable: HashSet<&'a str>,
    rejected: HashSet<&'a str>,
}

impl<'a> Resolution<'a> {
    fn from_classifications(classifications: &'a [Classification]) -> Self {
        let mut verifiable = HashSet::new();
        let mut rejected = HashSet::new();
        for c in classifications {
            if c.is_verifiable {
                verifiable.insert(c.claim_id.as_str());
            } else {
                rejected.insert(c.claim_id.as_str());
            }
        }
        Self { verifiable, rejected }
    }

    /// Kept unless the model explicitly rejected it and never accepted it
    fn is_verifiable(&self, claim_id: &str) -> bool {
        self.verifiable.contains(claim_id) || !self.rejected.contains(claim_id)
    }
}
