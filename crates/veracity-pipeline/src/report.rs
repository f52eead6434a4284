//! Verification report types

use serde::{Deserialize, Serialize};
use veracity_domain::{Claim, Evidence, PageScore, Verdict, VerificationSummary};

/// A verified claim with the evidence its verdict was based on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimResult {
    /// The claim
    pub claim: Claim,
    /// Its verdict
    pub verdict: Verdict,
    /// Deduplicated evidence retrieved for it
    pub evidence: Vec<Evidence>,
}

/// Models used by each LLM stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsUsed {
    /// Classification model
    pub classifier: String,
    /// Verdict model
    pub synthesizer: String,
}

/// Outcome of a full pipeline run
///
/// Serializable so it can be stored in the result cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Verifiable claims in input order, each with its verdict
    pub claims: Vec<ClaimResult>,
    /// Claims the classifier dropped
    #[serde(default)]
    pub unverifiable: Vec<Claim>,
    /// Aggregate score over `claims`
    pub page_score: PageScore,
    /// Verdict counts over `claims`
    pub summary: VerificationSummary,
    /// Models behind the verdicts
    pub models_used: ModelsUsed,
    /// Total evidence items across claims
    pub sources_checked: usize,
}

impl VerificationReport {
    /// Verdicts in claim order
    pub fn verdicts(&self) -> impl Iterator<Item = &Verdict> {
        self.claims.iter().map(|result| &result.verdict)
    }
}
