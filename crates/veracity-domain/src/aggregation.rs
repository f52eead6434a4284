//! Page-level aggregation of verdicts
//!
//! Implements the deterministic page score and verdict-count summary.
//! Verdict order is significant: earlier claims (headline, intro) weigh
//! more than later ones.

use crate::{Verdict, VerdictLabel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score returned for a page with no claims
pub const NEUTRAL_PAGE_SCORE: u8 = 50;

/// Aggregate trust score of a page, in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageScore(u8);

impl PageScore {
    /// Create a page score, capping at 100
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Get the raw value
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PageScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Count of verdicts per label
///
/// Covers every label; the counts sum to the number of verdicts summarized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// `strongly_supported` count
    pub strongly_supported: usize,
    /// `supported` count
    pub supported: usize,
    /// `mixed` count
    pub mixed: usize,
    /// `weak` count
    pub weak: usize,
    /// `contradicted` count
    pub contradicted: usize,
    /// `outdated` count
    pub outdated: usize,
    /// `not_verifiable` count
    pub not_verifiable: usize,
}

impl VerificationSummary {
    /// Record one verdict label
    pub fn record(&mut self, label: VerdictLabel) {
        *self.slot_mut(label) += 1;
    }

    /// Count for a single label
    pub fn count(&self, label: VerdictLabel) -> usize {
        match label {
            VerdictLabel::StronglySupported => self.strongly_supported,
            VerdictLabel::Supported => self.supported,
            VerdictLabel::Mixed => self.mixed,
            VerdictLabel::Weak => self.weak,
            VerdictLabel::Contradicted => self.contradicted,
            VerdictLabel::Outdated => self.outdated,
            VerdictLabel::NotVerifiable => self.not_verifiable,
        }
    }

    /// Total verdicts recorded
    pub fn total(&self) -> usize {
        VerdictLabel::ALL.iter().map(|label| self.count(*label)).sum()
    }

    fn slot_mut(&mut self, label: VerdictLabel) -> &mut usize {
        match label {
            VerdictLabel::StronglySupported => &mut self.strongly_supported,
            VerdictLabel::Supported => &mut self.supported,
            VerdictLabel::Mixed => &mut self.mixed,
            VerdictLabel::Weak => &mut self.weak,
            VerdictLabel::Contradicted => &mut self.contradicted,
            VerdictLabel::Outdated => &mut self.outdated,
            VerdictLabel::NotVerifiable => &mut self.not_verifiable,
        }
    }
}

/// Deterministic arithmetic over an ordered verdict list
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAggregator;

impl ResultAggregator {
    /// Create an aggregator
    pub fn new() -> Self {
        Self
    }

    /// Compute the page score
    ///
    /// For the claim at zero-based position `i`:
    /// `position_weight = 1 + 0.5 / (i + 1)` and
    /// `claim_score = label_weight * confidence`. The result is
    /// `round(100 * Σ(claim_score * position_weight) / Σ position_weight)`,
    /// or 50 when there are no verdicts.
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_domain::{ResultAggregator, Verdict, VerdictLabel};
    ///
    /// let aggregator = ResultAggregator::new();
    /// assert_eq!(aggregator.score(&[]).value(), 50);
    ///
    /// let verdicts = vec![Verdict::new("c1", VerdictLabel::StronglySupported, 1.0, "Three sources agree.", "m")];
    /// assert_eq!(aggregator.score(&verdicts).value(), 100);
    /// ```
    pub fn score(&self, verdicts: &[Verdict]) -> PageScore {
        if verdicts.is_empty() {
            return PageScore::new(NEUTRAL_PAGE_SCORE);
        }

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for (i, verdict) in verdicts.iter().enumerate() {
            let position_weight = position_weight(i);
            let claim_score = verdict.verdict.weight() * verdict.confidence.value();

            weighted_sum += claim_score * position_weight;
            total_weight += position_weight;
        }

        let ratio = (weighted_sum / total_weight).clamp(0.0, 1.0);
        PageScore::new((ratio * 100.0).round() as u8)
    }

    /// Count verdicts per label
    pub fn summarize(&self, verdicts: &[Verdict]) -> VerificationSummary {
        let mut summary = VerificationSummary::default();
        for verdict in verdicts {
            summary.record(verdict.verdict);
        }
        summary
    }
}

/// Earlier claims weigh more: 1.5, 1.25, 1.1667, ...
fn position_weight(index: usize) -> f64 {
    1.0 + 0.5 / (index as f64 + 1.0)
}
