//! Core VerdictSynthesizer implementation

use crate::config::SynthesizerConfig;
use crate::error::SynthesizerError;
use crate::parser::parse_verdict;
use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use veracity_domain::text::preview;
use veracity_domain::{Claim, CompletionRequest, Evidence, EvidenceMap, LlmProvider, Verdict, VerdictLabel};

/// Confidence ceiling for a verdict on a claim with no evidence
pub const NO_EVIDENCE_CONFIDENCE_CAP: f64 = 0.3;

/// Reasoning stamped on a verdict downgraded for lack of evidence
pub const NO_EVIDENCE_REASONING: &str =
    "No evidence was found for this claim, so it cannot be verified.";

/// Produces one verdict per claim
pub struct VerdictSynthesizer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: SynthesizerConfig,
}

impl<L> VerdictSynthesizer<L>
where
    L: LlmProvider,
{
    /// Create a new VerdictSynthesizer
    pub fn new(llm_provider: L, config: SynthesizerConfig) -> Self {
        Self::with_shared(Arc::new(llm_provider), config)
    }

    /// Create a VerdictSynthesizer over a shared provider
    pub fn with_shared(llm_provider: Arc<L>, config: SynthesizerConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// Model stamped on every verdict
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Verify every claim against its evidence
    ///
    /// Returns exactly one verdict per claim, in input order. Claims are
    /// verified `config.concurrency` at a time (one by default).
    pub async fn verify(&self, claims: &[Claim], evidence: &EvidenceMap) -> Vec<Verdict> {
        if claims.is_empty() {
            return Vec::new();
        }

        info!("Verifying {} claims", claims.len());

        let verdicts: Vec<Verdict> = stream::iter(claims)
            .map(|claim| {
                let items = evidence.get(&claim.id).map(Vec::as_slice).unwrap_or(&[]);
                self.verify_or_fallback(claim, items)
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        info!("Claims verified: {}", verdicts.len());
        verdicts
    }

    async fn verify_or_fallback(&self, claim: &Claim, evidence: &[Evidence]) -> Verdict {
        match self.verify_claim(claim, evidence).await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!("Verification failed for claim {}: {}", claim.id, e);
                Verdict::fallback(&claim.id, self.model_name())
            }
        }
    }

    async fn verify_claim(&self, claim: &Claim, evidence: &[Evidence]) -> Result<Verdict, SynthesizerError> {
        let shown = &evidence[..evidence.len().min(self.config.max_evidence_items)];
        let prompt = PromptBuilder::new(claim, shown)
            .with_max_evidence_items(self.config.max_evidence_items)
            .build();
        debug!("Verification prompt for {}: {} chars", claim.id, prompt.len());

        let request = CompletionRequest::new(SYSTEM_PROMPT, prompt, self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let response = timeout(self.config.timeout(), self.llm_provider.complete(&request))
            .await
            .map_err(|_| SynthesizerError::Timeout)?
            .map_err(|e| SynthesizerError::Llm(e.to_string()))?;

        let verdict = parse_verdict(&response, &claim.id, self.model_name()).inspect_err(|e| {
            warn!(
                "Unparseable verdict for claim {} ({}): {}",
                claim.id,
                e,
                preview(&response, 200)
            );
        })?;

        if shown.is_empty() {
            return Ok(without_evidence(verdict));
        }
        Ok(cited_only(verdict, shown))
    }
}

/// Drop source URLs that were not among the evidence shown to the model
fn cited_only(mut verdict: Verdict, shown: &[Evidence]) -> Verdict {
    let urls: HashSet<&str> = shown.iter().map(|e| e.url.as_str()).collect();
    let before = verdict.supporting_sources.len() + verdict.contradicting_sources.len();

    verdict.supporting_sources.retain(|u| urls.contains(u.as_str()));
    verdict.contradicting_sources.retain(|u| urls.contains(u.as_str()));

    let dropped = before - verdict.supporting_sources.len() - verdict.contradicting_sources.len();
    if dropped > 0 {
        debug!("Dropped {} uncited sources from verdict for {}", dropped, verdict.claim_id);
    }
    verdict
}

/// With nothing to cite, only a low-confidence `not_verifiable` is allowed
fn without_evidence(mut verdict: Verdict) -> Verdict {
    if verdict.verdict != VerdictLabel::NotVerifiable {
        warn!(
            "Claim {} has no evidence but the model answered '{}'; downgrading",
            verdict.claim_id, verdict.verdict
        );
        verdict.reasoning = NO_EVIDENCE_REASONING.to_string();
    }
    let confidence = verdict.confidence.value().min(NO_EVIDENCE_CONFIDENCE_CAP);
    verdict.verdict = VerdictLabel::NotVerifiable;
    verdict.confidence = confidence.into();
    verdict.supporting_sources.clear();
    verdict.contradicting_sources.clear();
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::verdict::FALLBACK_REASONING;
    use veracity_domain::UnitScore;
    use veracity_llm::MockProvider;

    fn claims() -> Vec<Claim> {
        vec![
            Claim::new("c1", "The study was published in Nature journal in March 2024."),
            Claim::new("c2", "Over 10,000 users use this product."),
            Claim::new("c3", "The company was founded in 2012."),
        ]
    }

    fn evidence_for(claim_id: &str) -> EvidenceMap {
        let item = Evidence {
            url: "https://www.nature.com/articles/x".to_string(),
            title: "Nature".to_string(),
            snippet: "Published March 2024".to_string(),
            domain: "www.nature.com".to_string(),
            published_at: Some("2024-03-14".to_string()),
            relevance_score: UnitScore::NEUTRAL,
            domain_reputation: UnitScore::new(0.95),
        };
        EvidenceMap::from([(claim_id.to_string(), vec![item])])
    }

    const SUPPORTED: &str = r#"{"verdict": "supported", "confidence": 0.85, "reasoning": "A high-reputation source confirms it.", "supporting_sources": ["https://www.nature.com/articles/x"]}"#;

    #[tokio::test]
    async fn test_empty_input() {
        let llm = MockProvider::new(SUPPORTED);
        let synthesizer = VerdictSynthesizer::new(llm.clone(), SynthesizerConfig::default());
        assert!(synthesizer.verify(&[], &EvidenceMap::new()).await.is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_one_verdict_per_claim_in_order() {
        let llm = MockProvider::new(SUPPORTED).with_model("llama-3.3-70b-versatile");
        let synthesizer = VerdictSynthesizer::new(llm.clone(), SynthesizerConfig::default());
        let claims = claims();
        let mut evidence = evidence_for("c1");
        evidence.extend(evidence_for("c2"));
        evidence.extend(evidence_for("c3"));

        let verdicts = synthesizer.verify(&claims, &evidence).await;

        assert_eq!(verdicts.len(), 3);
        for (claim, verdict) in claims.iter().zip(&verdicts) {
            assert_eq!(verdict.claim_id, claim.id);
            assert_eq!(verdict.verdict, VerdictLabel::Supported);
            assert_eq!(verdict.model_used, "llama-3.3-70b-versatile");
        }
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_one_claim() {
        let llm = MockProvider::new(SUPPORTED);
        llm.push_response(SUPPORTED);
        llm.push_error("upstream 500");
        llm.push_response("no json here");
        let synthesizer = VerdictSynthesizer::new(llm.clone(), SynthesizerConfig::default());

        let mut evidence = evidence_for("c1");
        evidence.extend(evidence_for("c2"));
        evidence.extend(evidence_for("c3"));
        let verdicts = synthesizer.verify(&claims(), &evidence).await;

        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[0].verdict, VerdictLabel::Supported);

        for fallback in &verdicts[1..] {
            assert_eq!(fallback.verdict, VerdictLabel::NotVerifiable);
            assert_eq!(fallback.confidence, UnitScore::ZERO);
            assert_eq!(fallback.reasoning, FALLBACK_REASONING);
            assert!(fallback.supporting_sources.is_empty());
            assert_eq!(fallback.model_used, "mock-model");
        }
    }

    #[tokio::test]
    async fn test_sequential_requests_follow_claim_order() {
        let llm = MockProvider::new(SUPPORTED);
        let synthesizer = VerdictSynthesizer::new(llm.clone(), SynthesizerConfig::default());
        synthesizer.verify(&claims(), &EvidenceMap::new()).await;

        let requests = llm.requests();
        assert!(requests[0].prompt.contains("Nature journal"));
        assert!(requests[1].prompt.contains("10,000 users"));
        assert!(requests[2].prompt.contains("founded in 2012"));
        assert_eq!(requests[0].max_tokens, 1000);
        assert_eq!(requests[0].temperature, 0.0);
        assert_eq!(requests[0].system, SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn test_no_evidence_never_strongly_supported() {
        let llm = MockProvider::new(
            r#"{"verdict": "strongly_supported", "confidence": 0.97, "reasoning": "I am quite sure this is right.", "supporting_sources": ["https://made-up.example"]}"#,
        );
        let synthesizer = VerdictSynthesizer::new(llm.clone(), SynthesizerConfig::default());

        let verdicts = synthesizer.verify(&claims()[..1], &EvidenceMap::new()).await;

        assert_eq!(verdicts[0].verdict, VerdictLabel::NotVerifiable);
        assert!(verdicts[0].confidence.value() <= NO_EVIDENCE_CONFIDENCE_CAP);
        assert!(verdicts[0].supporting_sources.is_empty());
        assert_eq!(verdicts[0].reasoning, NO_EVIDENCE_REASONING);
        assert!(llm.requests()[0].prompt.contains("No evidence found for this claim."));
    }

    #[tokio::test]
    async fn test_evidence_hidden_by_zero_limit_counts_as_none() {
        let llm = MockProvider::new(
            r#"{"verdict": "strongly_supported", "confidence": 0.97, "reasoning": "Three reputable sources fully confirm this.", "supporting_sources": ["https://www.nature.com/articles/x"]}"#,
        );
        let config = SynthesizerConfig {
            max_evidence_items: 0,
            ..SynthesizerConfig::default()
        };
        let synthesizer = VerdictSynthesizer::new(llm.clone(), config);

        let verdicts = synthesizer.verify(&claims()[..1], &evidence_for("c1")).await;

        assert_eq!(verdicts[0].verdict, VerdictLabel::NotVerifiable);
        assert!(verdicts[0].confidence.value() <= NO_EVIDENCE_CONFIDENCE_CAP);
        assert!(verdicts[0].supporting_sources.is_empty());
        assert_eq!(verdicts[0].reasoning, NO_EVIDENCE_REASONING);
        assert!(llm.requests()[0].prompt.contains("No evidence found for this claim."));
    }

    #[tokio::test]
    async fn test_uncited_sources_are_dropped() {
        let llm = MockProvider::new(
            r#"{"verdict": "mixed", "confidence": 0.5, "reasoning": "Sources disagree on the date.", "supporting_sources": ["https://www.nature.com/articles/x", "https://fabricated.example/x"], "contradicting_sources": ["https://fabricated.example/y"]}"#,
        );
        let synthesizer = VerdictSynthesizer::new(llm, SynthesizerConfig::default());

        let verdicts = synthesizer.verify(&claims()[..1], &evidence_for("c1")).await;

        assert_eq!(verdicts[0].verdict, VerdictLabel::Mixed);
        assert_eq!(verdicts[0].supporting_sources, vec!["https://www.nature.com/articles/x"]);
        assert!(verdicts[0].contradicting_sources.is_empty());
    }

    #[tokio::test]
    async fn test_no_evidence_keeps_low_confidence() {
        let llm = MockProvider::new(
            r#"{"verdict": "not_verifiable", "confidence": 0.1, "reasoning": "No sources were available."}"#,
        );
        let synthesizer = VerdictSynthesizer::new(llm, SynthesizerConfig::default());

        let verdicts = synthesizer.verify(&claims()[..1], &EvidenceMap::new()).await;
        assert_eq!(verdicts[0].confidence.value(), 0.1);
        assert_eq!(verdicts[0].reasoning, "No sources were available.");
    }

    #[tokio::test]
    async fn test_parallel_preserves_order() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "Nature journal",
            r#"{"verdict": "supported", "confidence": 0.8, "reasoning": "Journal archive confirms."}"#,
        );
        llm.add_response(
            "10,000 users",
            r#"{"verdict": "weak", "confidence": 0.4, "reasoning": "Only the vendor says so."}"#,
        );
        llm.add_response(
            "founded in 2012",
            r#"{"verdict": "contradicted", "confidence": 0.9, "reasoning": "Registry shows 2014 instead."}"#,
        );
        let synthesizer = VerdictSynthesizer::new(llm, SynthesizerConfig::parallel());

        let mut evidence = evidence_for("c1");
        evidence.extend(evidence_for("c2"));
        evidence.extend(evidence_for("c3"));
        let verdicts = synthesizer.verify(&claims(), &evidence).await;

        let labels: Vec<VerdictLabel> = verdicts.iter().map(|v| v.verdict).collect();
        assert_eq!(
            labels,
            vec![VerdictLabel::Supported, VerdictLabel::Weak, VerdictLabel::Contradicted]
        );
    }
}
