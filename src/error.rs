//! Error types for quoting, submission gating, rules loading, sessions,
//! risk scoring and registration eligibility

use crate::application::ApplicationStatus;
use thiserror::Error;

/// Validation failures raised by the affordability engine.
///
/// The engine never coerces bad input to a default; every malformed figure
/// is reported through one of these variants.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum QuoteError {
    #[error("principal must be a finite amount greater than zero, got {0}")]
    InvalidPrincipal(f64),
    #[error("term must be at least one month, got {0}")]
    InvalidTerm(u32),
    #[error("interest rate must be a finite non-negative percentage, got {0}")]
    InvalidRate(f64),
    #[error("monthly income must be a finite amount greater than zero, got {0}")]
    InvalidIncome(f64),
    #[error("current monthly debt must be a finite non-negative amount, got {0}")]
    InvalidDebt(f64),
    #[error("monthly payment must be a finite non-negative amount, got {0}")]
    InvalidPayment(f64),
    #[error("{0} is too large to represent")]
    Overflow(&'static str),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("a purpose is required for every loan application")]
    MissingPurpose,
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error("cannot move application from {from} to {to}")]
    InvalidStatusTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown affordability rule: {0}")]
    UnknownRule(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
    #[error("warning threshold {warn}% must not exceed the submission ceiling {max}%")]
    InvalidThresholds { warn: f64, max: f64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Input rejected by the risk scorer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("requested amount must be greater than zero, got {0}")]
    InvalidAmount(rust_decimal::Decimal),
    #[error("term must be at least one month, got {0}")]
    InvalidTerm(u32),
    #[error("monthly income must be greater than zero, got {0}")]
    InvalidIncome(rust_decimal::Decimal),
    #[error("current debt must be zero or greater, got {0}")]
    InvalidDebt(rust_decimal::Decimal),
}

/// Registration rule the credit-application service would refuse on
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EligibilityError {
    #[error("affiliate must have at least {required} months of affiliation, current: {months} months")]
    InsufficientAffiliationTime { months: i64, required: i64 },
    #[error("minimum credit amount is ${min}, requested ${amount}")]
    AmountTooLow {
        amount: rust_decimal::Decimal,
        min: rust_decimal::Decimal,
    },
    #[error("maximum credit amount is ${max}, requested ${amount}")]
    AmountTooHigh {
        amount: rust_decimal::Decimal,
        max: rust_decimal::Decimal,
    },
    #[error("minimum credit term is {min} months, requested {term}")]
    TermTooShort { term: u32, min: u32 },
    #[error("maximum credit term is {max} months, requested {term}")]
    TermTooLong { term: u32, max: u32 },
    #[error("only active affiliates can request credit")]
    InactiveAffiliate,
    #[error("requested amount (${requested}) exceeds the affiliate's maximum credit limit (${limit} based on salary)")]
    ExceedsAffiliateLimit {
        requested: rust_decimal::Decimal,
        limit: rust_decimal::Decimal,
    },
    #[error("affiliate already has a pending credit application")]
    PendingApplicationExists,
}

impl EligibilityError {
    /// Error code the credit-application service reports for this rule
    pub fn code(&self) -> &'static str {
        match self {
            EligibilityError::InsufficientAffiliationTime { .. } => "INSUFFICIENT_AFFILIATION_TIME",
            EligibilityError::AmountTooLow { .. } => "AMOUNT_TOO_LOW",
            EligibilityError::AmountTooHigh { .. } => "AMOUNT_TOO_HIGH",
            EligibilityError::TermTooShort { .. } => "TERM_TOO_SHORT",
            EligibilityError::TermTooLong { .. } => "TERM_TOO_LONG",
            EligibilityError::InactiveAffiliate => "AFFILIATE_INACTIVE",
            EligibilityError::ExceedsAffiliateLimit { .. } => "AMOUNT_EXCEEDS_AFFILIATE_LIMIT",
            EligibilityError::PendingApplicationExists => "PENDING_APPLICATION_EXISTS",
        }
    }
}
