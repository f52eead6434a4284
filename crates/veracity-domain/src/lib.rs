//! Veracity Domain Layer
//!
//! Core value types and deterministic logic for the claim-verification
//! pipeline. Infrastructure (LLM providers, search backends, cache storage)
//! lives in other crates and plugs in through the traits defined here.
//!
//! ## Key Concepts
//!
//! - **Claim**: An atomic factual assertion with a caller-assigned id
//! - **Evidence**: A retrieved web result annotated with source trust
//! - **Verdict**: One of seven labels, plus confidence and rationale
//! - **Domain reputation**: Static trust score/category for a web domain
//! - **Page score**: Position- and confidence-weighted aggregate in [0, 100]
//!
//! ## Architecture
//!
//! - Pure data and arithmetic only; no I/O
//! - Invariants (confidence in [0, 1], closed verdict set) are enforced by
//!   the types themselves rather than by boundary validation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregation;
pub mod claim;
pub mod evidence;
pub mod reputation;
pub mod score;
pub mod text;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use aggregation::{PageScore, ResultAggregator, VerificationSummary};
pub use claim::{Claim, Classification};
pub use evidence::{Evidence, EvidenceMap};
pub use reputation::{DomainReputationIndex, ReputationEntry};
pub use score::UnitScore;
pub use traits::{CompletionRequest, LlmProvider};
pub use verdict::{Verdict, VerdictLabel};
