//! Unit-interval scores

use serde::{Deserialize, Serialize};
use std::fmt;

/// A score clamped to [0.0, 1.0]
///
/// Used for verdict confidence, domain reputation and relevance. The value
/// is clamped at construction, so an out-of-range score cannot exist. NaN
/// clamps to 0.0. Serializes as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct UnitScore(f64);

impl UnitScore {
    /// 0.0
    pub const ZERO: UnitScore = UnitScore(0.0);

    /// 0.5, the neutral value used for unknown domains and default relevance
    pub const NEUTRAL: UnitScore = UnitScore(0.5);

    /// 1.0
    pub const ONE: UnitScore = UnitScore(1.0);

    /// Create a score, clamping into [0.0, 1.0]
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_domain::UnitScore;
    ///
    /// assert_eq!(UnitScore::new(1.7).value(), 1.0);
    /// assert_eq!(UnitScore::new(-0.2).value(), 0.0);
    /// assert_eq!(UnitScore::new(0.42).value(), 0.42);
    /// ```
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for UnitScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<UnitScore> for f64 {
    fn from(score: UnitScore) -> Self {
        score.0
    }
}

impl fmt::Display for UnitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
