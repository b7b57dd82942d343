//! Deterministic credit risk scoring
//!
//! Mirrors the backend's independent evaluation of a submitted application
//! and the registration rules it applies before accepting one.
//! Results here are informational: the client-side submission gate never
//! consults them, and the backend's own score is always the one of record.

mod types;
mod scoring;
mod eligibility;

pub use types::{RiskLevel, Recommendation, RiskEvaluation, RiskEvaluationRequest};
pub use scoring::{RiskEvaluator, document_base_score, java_string_hash};
pub use eligibility::{
    AffiliateProfile, AffiliateStatus, EligibilityChecker, months_between,
    MIN_AFFILIATION_MONTHS, MIN_CREDIT_AMOUNT, MAX_CREDIT_AMOUNT, MIN_TERM_MONTHS,
    MAX_TERM_MONTHS, SALARY_MULTIPLIER,
};
