//! Veracity Verification Pipeline
//!
//! Facade over the pipeline stages, exposing each stage operation and a
//! convenience runner that calls them in order.
//!
//! # Architecture
//!
//! ```text
//! claims → classify → fetch_evidence → verify → score / summarize
//! ```
//!
//! No stage operation fails: the classifier fails open, retrieval isolates
//! failures per query, and the synthesizer fails closed per claim. The
//! report therefore always carries one verdict per verifiable claim.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::collections::HashMap;
//! use veracity_domain::Claim;
//! use veracity_pipeline::{PipelineConfig, VerificationPipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = VerificationPipeline::from_config(&PipelineConfig::default())?;
//!
//! let claims = vec![Claim::new("clm_001", "The study was published in Nature in March 2024.")];
//! let report = pipeline.verify_claims(claims, &HashMap::new()).await;
//!
//! println!("Page score: {}", report.page_score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod report;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use report::{ClaimResult, ModelsUsed, VerificationReport};

use std::collections::HashMap;
use tracing::info;
use veracity_classifier::ClaimClassifier;
use veracity_domain::{
    Claim, EvidenceMap, LlmProvider, PageScore, ResultAggregator, Verdict, VerificationSummary,
};
use veracity_llm::AnyProvider;
use veracity_retrieval::EvidenceRetriever;
use veracity_synthesizer::VerdictSynthesizer;

/// The verification stages wired together
pub struct VerificationPipeline<L>
where
    L: LlmProvider,
{
    classifier: ClaimClassifier<L>,
    retriever: EvidenceRetriever,
    synthesizer: VerdictSynthesizer<L>,
    aggregator: ResultAggregator,
}

impl VerificationPipeline<AnyProvider> {
    /// Build every stage from configuration
    ///
    /// The classifier runs on `llm.fast_model`, the synthesizer on `llm.model`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;

        let fast = AnyProvider::from_config(&config.llm, &config.llm.fast_model)?;
        let main = AnyProvider::from_config(&config.llm, &config.llm.model)?;
        let retriever = EvidenceRetriever::from_config(config.retrieval.clone())?;

        Ok(Self::new(
            ClaimClassifier::new(fast, config.classifier.clone()),
            retriever,
            VerdictSynthesizer::new(main, config.synthesizer.clone()),
        ))
    }
}

impl<L> VerificationPipeline<L>
where
    L: LlmProvider,
{
    /// Assemble a pipeline from its stages
    pub fn new(
        classifier: ClaimClassifier<L>,
        retriever: EvidenceRetriever,
        synthesizer: VerdictSynthesizer<L>,
    ) -> Self {
        Self {
            classifier,
            retriever,
            synthesizer,
            aggregator: ResultAggregator::new(),
        }
    }

    /// Keep the verifiable claims, annotating each input claim
    pub async fn classify(&self, claims: &mut [Claim]) -> Vec<Claim> {
        self.classifier.filter(claims).await
    }

    /// Retrieve evidence per claim
    pub async fn fetch_evidence(&self, queries: &HashMap<String, Vec<String>>) -> EvidenceMap {
        self.retriever.fetch(queries).await
    }

    /// One verdict per claim, in order
    pub async fn verify(&self, claims: &[Claim], evidence: &EvidenceMap) -> Vec<Verdict> {
        self.synthesizer.verify(claims, evidence).await
    }

    /// Page score over ordered verdicts
    pub fn score(&self, verdicts: &[Verdict]) -> PageScore {
        self.aggregator.score(verdicts)
    }

    /// Verdict counts per label
    pub fn summarize(&self, verdicts: &[Verdict]) -> VerificationSummary {
        self.aggregator.summarize(verdicts)
    }

    /// Run all stages over `claims`
    ///
    /// `queries` maps claim ids to search queries; a claim with no entry
    /// (or an empty one) is searched by its own text.
    pub async fn verify_claims(
        &self,
        mut claims: Vec<Claim>,
        queries: &HashMap<String, Vec<String>>,
    ) -> VerificationReport {
        info!("Running verification pipeline over {} claims", claims.len());

        let verifiable = self.classify(&mut claims).await;
        let unverifiable: Vec<Claim> = claims
            .into_iter()
            .filter(|claim| claim.is_verifiable == Some(false))
            .collect();

        let search_queries = queries_for(&verifiable, queries);
        let mut evidence = self.fetch_evidence(&search_queries).await;
        let verdicts = self.verify(&verifiable, &evidence).await;

        let page_score = self.score(&verdicts);
        let summary = self.summarize(&verdicts);

        let results: Vec<ClaimResult> = verifiable
            .into_iter()
            .zip(verdicts)
            .map(|(claim, verdict)| {
                let evidence = evidence.remove(&claim.id).unwrap_or_default();
                ClaimResult {
                    claim,
                    verdict,
                    evidence,
                }
            })
            .collect();
        let sources_checked: usize = results.iter().map(|r| r.evidence.len()).sum();

        info!(
            "Pipeline complete: score {}, {} verdicts, {} sources",
            page_score,
            results.len(),
            sources_checked
        );

        VerificationReport {
            claims: results,
            unverifiable,
            page_score,
            summary,
            models_used: ModelsUsed {
                classifier: self.classifier.model_name().to_string(),
                synthesizer: self.synthesizer.model_name().to_string(),
            },
            sources_checked,
        }
    }
}

/// Queries for each claim, falling back to the claim text
fn queries_for(claims: &[Claim], queries: &HashMap<String, Vec<String>>) -> HashMap<String, Vec<String>> {
    claims
        .iter()
        .map(|claim| {
            let claim_queries = match queries.get(&claim.id) {
                Some(qs) if !qs.is_empty() => qs.clone(),
                _ => vec![claim.text.clone()],
            };
            (claim.id.clone(), claim_queries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_fall_back_to_claim_text() {
        let claims = vec![
            Claim::new("c1", "Over 10,000 users use this product."),
            Claim::new("c2", "Founded in 2012."),
            Claim::new("c3", "Listed on NASDAQ."),
        ];
        let mut queries = HashMap::new();
        queries.insert("c1".to_string(), vec!["product 10,000 users".to_string()]);
        queries.insert("c3".to_string(), vec![]);
        queries.insert("other".to_string(), vec!["unused".to_string()]);

        let resolved = queries_for(&claims, &queries);

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved["c1"], vec!["product 10,000 users"]);
        assert_eq!(resolved["c2"], vec!["Founded in 2012."]);
        assert_eq!(resolved["c3"], vec!["Listed on NASDAQ."]);
    }
}
