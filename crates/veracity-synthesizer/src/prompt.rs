//! LLM prompt engineering for verdict synthesis

use veracity_domain::{Claim, Evidence};

/// System instruction sent with every verification call
pub const SYSTEM_PROMPT: &str =
    "You are a fact-checking expert. Always respond with valid JSON only.";

/// Evidence block used when a claim has no evidence
pub const NO_EVIDENCE_MARKER: &str = "No evidence found for this claim.";

/// Builds the verification prompt for one claim
pub struct PromptBuilder<'a> {
    claim: &'a Claim,
    evidence: &'a [Evidence],
    max_evidence_items: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for `claim`
    pub fn new(claim: &'a Claim, evidence: &'a [Evidence]) -> Self {
        Self {
            claim,
            evidence,
            max_evidence_items: 5,
        }
    }

    /// Limit how many evidence items are shown
    pub fn with_max_evidence_items(mut self, max: usize) -> Self {
        self.max_evidence_items = max;
        self
    }

    /// Build the complete verification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "You are an expert fact-checker. Analyze this claim against the provided evidence.\n\n",
        );
        prompt.push_str("CLAIM TO VERIFY:\n");
        prompt.push_str(&self.claim.text);
        prompt.push_str("\n\nEVIDENCE:\n");
        prompt.push_str(&self.evidence_block());
        prompt.push_str("\n\n");
        prompt.push_str(INSTRUCTIONS);

        prompt
    }

    /// Numbered source listing, or the no-evidence marker
    pub fn evidence_block(&self) -> String {
        if self.evidence.is_empty() || self.max_evidence_items == 0 {
            return NO_EVIDENCE_MARKER.to_string();
        }

        self.evidence
            .iter()
            .take(self.max_evidence_items)
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "Source {}:\n  URL: {}\n  Domain: {} (reputation: {:.2})\n  Published: {}\n  Content: {}",
                    i + 1,
                    e.url,
                    e.domain,
                    e.domain_reputation.value(),
                    e.published_at.as_deref().unwrap_or("Unknown"),
                    e.snippet
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

const INSTRUCTIONS: &str = r#"Based on the evidence, provide your verdict:

1. Verdict (choose exactly one):
   - strongly_supported: Multiple high-quality sources confirm this claim
   - supported: Evidence generally supports this claim
   - mixed: Evidence is conflicting or partial
   - weak: Limited or unreliable evidence
   - contradicted: Evidence contradicts this claim
   - outdated: Evidence suggests the information is no longer current
   - not_verifiable: Not enough evidence to decide

2. Confidence (0.0 to 1.0), calibrated as follows:
   - 0.95+: 3+ high-reputation sources (0.9+) fully agree and the claim is specific
   - 0.85-0.94: 2+ high-reputation sources agree and the claim is clear
   - 0.70-0.84: 1 high-reputation source, or 2+ medium sources (0.7+), agree
   - 0.50-0.69: A single medium-reputation source, or conflicting evidence
   - 0.30-0.49: Weak evidence, low-reputation sources, or mostly contradicting
   - Below 0.30: No credible evidence or strong contradictions

3. Reasoning: 2-3 sentences explaining the verdict.
   When evidence conflicts, use "mixed", name both the supporting and the
   contradicting sources, and explain the disagreement. Higher-reputation
   sources weigh more.

4. Supporting sources: URLs that support the claim (if any)

5. Contradicting sources: URLs that contradict the claim (if any)

Respond in JSON format:
{
    "verdict": "...",
    "confidence": 0.X,
    "reasoning": "...",
    "supporting_sources": ["url1", "url2"],
    "contradicting_sources": ["url1"]
}

RULES:
- Base the verdict ONLY on the provided evidence; do not assume facts not in it
- If the evidence is insufficient, use "not_verifiable" with low confidence
- Be conservative: prefer "mixed" or "weak" when uncertain
- Return ONLY valid JSON, no other text"#;

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::UnitScore;

    fn evidence(i: usize, published_at: Option<&str>) -> Evidence {
        Evidence {
            url: format!("https://www.reuters.com/{}", i),
            title: format!("Title {}", i),
            snippet: format!("Snippet {}", i),
            domain: "www.reuters.com".to_string(),
            published_at: published_at.map(String::from),
            relevance_score: UnitScore::NEUTRAL,
            domain_reputation: UnitScore::new(0.95),
        }
    }

    #[test]
    fn test_no_evidence_marker() {
        let claim = Claim::new("c1", "Claim text");
        let prompt = PromptBuilder::new(&claim, &[]).build();
        assert!(prompt.contains("CLAIM TO VERIFY:\nClaim text"));
        assert!(prompt.contains(NO_EVIDENCE_MARKER));
    }

    #[test]
    fn test_evidence_block_format() {
        let claim = Claim::new("c1", "Claim text");
        let items = vec![evidence(1, Some("2024-03-01")), evidence(2, None)];
        let block = PromptBuilder::new(&claim, &items).evidence_block();

        assert_eq!(
            block,
            "Source 1:\n  URL: https://www.reuters.com/1\n  Domain: www.reuters.com (reputation: 0.95)\n  Published: 2024-03-01\n  Content: Snippet 1\n\n\
             Source 2:\n  URL: https://www.reuters.com/2\n  Domain: www.reuters.com (reputation: 0.95)\n  Published: Unknown\n  Content: Snippet 2"
        );
    }

    #[test]
    fn test_evidence_limited_to_top_items() {
        let claim = Claim::new("c1", "Claim text");
        let items: Vec<Evidence> = (1..=8).map(|i| evidence(i, None)).collect();
        let block = PromptBuilder::new(&claim, &items).evidence_block();

        assert!(block.contains("Source 5:"));
        assert!(!block.contains("Source 6:"));

        let block = PromptBuilder::new(&claim, &items)
            .with_max_evidence_items(2)
            .evidence_block();
        assert!(!block.contains("Source 3:"));
    }

    #[test]
    fn test_instructions_list_every_label() {
        let claim = Claim::new("c1", "Claim text");
        let prompt = PromptBuilder::new(&claim, &[]).build();
        for label in veracity_domain::VerdictLabel::ALL {
            assert!(prompt.contains(label.as_str()), "{}", label);
        }
    }
}
