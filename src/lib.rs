//! Loan Affordability - client-side affordability engine for credit-union loan requests
//!
//! This library provides:
//! - Amortized monthly payment and debt-to-income ratio calculation
//! - Two-tier ratio classification (40% soft warning, 50% submission ceiling)
//! - Submission gating and the create-application payload
//! - Deterministic credit risk scoring matching the backend service
//! - Advisory registration eligibility checks (amount, term, tenure, salary limit)
//! - Explicit session context with a closed set of roles
//! - Parallel batch quoting

pub mod error;
pub mod rules;
pub mod quote;
pub mod application;
pub mod risk;
pub mod session;
pub mod runner;

// Re-export commonly used types
pub use error::{QuoteError, ApplicationError, RulesError, RiskError, EligibilityError, SessionError};
pub use rules::{AffordabilityRules, WARN_RATIO_PERCENT, MAX_RATIO_PERCENT};
pub use quote::{
    compute_monthly_payment, compute_debt_ratio, classify, Decision, QuoteEngine,
    LoanQuoteInput, LoanQuoteResult,
};
pub use application::{LoanApplication, ApplicationStatus, SubmissionGate, GateOutcome};
pub use risk::{RiskEvaluator, RiskEvaluation, EligibilityChecker, AffiliateProfile};
pub use session::{Role, SessionContext};
pub use runner::QuoteRunner;
