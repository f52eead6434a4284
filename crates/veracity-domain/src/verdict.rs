//! Verdict module - the pipeline's judgement on a claim

use crate::UnitScore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reasoning attached to verdicts that could not be synthesized
pub const FALLBACK_REASONING: &str = "Verification failed due to an error.";

/// The closed set of verdict labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLabel {
    /// Multiple high-quality sources confirm the claim
    StronglySupported,

    /// Evidence generally supports the claim
    Supported,

    /// Evidence is conflicting or partial
    Mixed,

    /// Limited or unreliable evidence
    Weak,

    /// Evidence contradicts the claim
    Contradicted,

    /// Evidence suggests the information is no longer current
    Outdated,

    /// Not enough evidence to decide
    NotVerifiable,
}

impl VerdictLabel {
    /// Every label, in canonical order
    pub const ALL: [VerdictLabel; 7] = [
        VerdictLabel::StronglySupported,
        VerdictLabel::Supported,
        VerdictLabel::Mixed,
        VerdictLabel::Weak,
        VerdictLabel::Contradicted,
        VerdictLabel::Outdated,
        VerdictLabel::NotVerifiable,
    ];

    /// Get the wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::StronglySupported => "strongly_supported",
            VerdictLabel::Supported => "supported",
            VerdictLabel::Mixed => "mixed",
            VerdictLabel::Weak => "weak",
            VerdictLabel::Contradicted => "contradicted",
            VerdictLabel::Outdated => "outdated",
            VerdictLabel::NotVerifiable => "not_verifiable",
        }
    }

    /// Weight of the label in the page score
    ///
    /// `NotVerifiable` shares the neutral 0.5 with `Mixed`.
    pub fn weight(&self) -> f64 {
        match self {
            VerdictLabel::StronglySupported => 1.0,
            VerdictLabel::Supported => 0.8,
            VerdictLabel::Mixed => 0.5,
            VerdictLabel::Weak => 0.3,
            VerdictLabel::Contradicted => 0.0,
            VerdictLabel::Outdated => 0.4,
            VerdictLabel::NotVerifiable => 0.5,
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerdictLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VerdictLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("Unknown verdict label: {}", s))
    }
}

/// Final judgement on one claim
///
/// Exactly one verdict is produced per input claim. The JSON shape is
/// wire-stable: `{claim_id, verdict, confidence, reasoning,
/// supporting_sources, contradicting_sources, model_used}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Id of the judged claim
    pub claim_id: String,

    /// Verdict label
    pub verdict: VerdictLabel,

    /// Confidence in the label
    pub confidence: UnitScore,

    /// Explanation of the judgement
    pub reasoning: String,

    /// URLs supporting the claim
    #[serde(default)]
    pub supporting_sources: Vec<String>,

    /// URLs contradicting the claim
    #[serde(default)]
    pub contradicting_sources: Vec<String>,

    /// Identifier of the model that produced the verdict
    pub model_used: String,
}

impl Verdict {
    /// Create a verdict, clamping confidence into [0, 1]
    pub fn new(
        claim_id: impl Into<String>,
        verdict: VerdictLabel,
        confidence: f64,
        reasoning: impl Into<String>,
        model_used: impl Into<String>,
    ) -> Self {
        Self {
            claim_id: claim_id.into(),
            verdict,
            confidence: UnitScore::new(confidence),
            reasoning: reasoning.into(),
            supporting_sources: Vec::new(),
            contradicting_sources: Vec::new(),
            model_used: model_used.into(),
        }
    }

    /// Attach source URLs
    pub fn with_sources(mut self, supporting: Vec<String>, contradicting: Vec<String>) -> Self {
        self.supporting_sources = supporting;
        self.contradicting_sources = contradicting;
        self
    }

    /// Fail-closed verdict for a claim whose synthesis failed
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_domain::{Verdict, VerdictLabel};
    ///
    /// let verdict = Verdict::fallback("clm_001", "llama-3.3-70b");
    /// assert_eq!(verdict.verdict, VerdictLabel::NotVerifiable);
    /// assert_eq!(verdict.confidence.value(), 0.0);
    /// assert!(verdict.supporting_sources.is_empty());
    /// ```
    pub fn fallback(claim_id: impl Into<String>, model_used: impl Into<String>) -> Self {
        Self::new(
            claim_id,
            VerdictLabel::NotVerifiable,
            0.0,
            FALLBACK_REASONING,
            model_used,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_names() {
        for label in VerdictLabel::ALL {
            assert_eq!(label.as_str().parse::<VerdictLabel>().unwrap(), label);
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!("true".parse::<VerdictLabel>().is_err());
        assert!(serde_json::from_str::<VerdictLabel>("\"probably\"").is_err());
    }

    #[test]
    fn test_constructor_clamps_confidence() {
        let verdict = Verdict::new("c1", VerdictLabel::Supported, 1.4, "Two sources agree.", "m");
        assert_eq!(verdict.confidence.value(), 1.0);

        let verdict = Verdict::new("c1", VerdictLabel::Weak, -0.3, "Low quality sources.", "m");
        assert_eq!(verdict.confidence.value(), 0.0);
    }

    #[test]
    fn test_wire_shape() {
        let verdict = Verdict::new("c1", VerdictLabel::Mixed, 0.6, "Sources disagree on date.", "m")
            .with_sources(vec!["https://a.org".into()], vec!["https://b.org".into()]);
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["verdict"], "mixed");
        assert_eq!(json["confidence"], 0.6);
        assert_eq!(json["supporting_sources"][0], "https://a.org");
        assert_eq!(json["contradicting_sources"][0], "https://b.org");
        assert_eq!(json["model_used"], "m");
    }
}
