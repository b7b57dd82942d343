//! Quote engine combining payment, ratio and classification

use crate::error::QuoteError;
use crate::rules::AffordabilityRules;
use super::classify::{classify_with, Decision};
use super::payment::{compute_debt_ratio, compute_monthly_payment};
use log::debug;
use serde::{Deserialize, Serialize};

/// Raw figures for a single affordability quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    /// Requested amount
    pub principal: f64,

    /// Stated rate as a percentage figure (12.5 = 12.5)
    pub annual_rate_percent: f64,

    /// Number of monthly installments
    pub term_months: u32,

    /// Applicant's monthly income
    pub monthly_income: f64,

    /// Existing monthly obligations before this loan
    #[serde(default)]
    pub current_monthly_debt: f64,
}

impl LoanQuoteInput {
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_months: u32,
        monthly_income: f64,
        current_monthly_debt: f64,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            monthly_income,
            current_monthly_debt,
        }
    }

    /// Check every invariant, reporting the first violated field
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(QuoteError::InvalidPrincipal(self.principal));
        }
        if self.term_months < 1 {
            return Err(QuoteError::InvalidTerm(self.term_months));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(QuoteError::InvalidRate(self.annual_rate_percent));
        }
        if !self.monthly_income.is_finite() || self.monthly_income <= 0.0 {
            return Err(QuoteError::InvalidIncome(self.monthly_income));
        }
        if !self.current_monthly_debt.is_finite() || self.current_monthly_debt < 0.0 {
            return Err(QuoteError::InvalidDebt(self.current_monthly_debt));
        }
        Ok(())
    }
}

/// Outcome of a quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteResult {
    pub monthly_payment: f64,

    /// `monthly_payment * term_months`
    pub total_payment: f64,

    /// Existing debt plus the new installment, in percent of income (may exceed 100)
    pub debt_to_income_ratio_percent: f64,

    pub decision: Decision,
}

impl LoanQuoteResult {
    /// Total paid above the principal over the life of the loan
    pub fn total_interest(&self, principal: f64) -> f64 {
        self.total_payment - principal
    }
}

/// Stateless quote engine
///
/// Holds only the thresholds it classifies against, so one engine can be
/// shared across threads and reused for any number of quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteEngine {
    rules: AffordabilityRules,
}

impl QuoteEngine {
    /// Create an engine classifying against the given rules
    pub fn new(rules: AffordabilityRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AffordabilityRules {
        &self.rules
    }

    /// Validate the input and produce a full quote
    pub fn quote(&self, input: &LoanQuoteInput) -> Result<LoanQuoteResult, QuoteError> {
        input.validate()?;

        let monthly_payment = compute_monthly_payment(
            input.principal,
            input.annual_rate_percent,
            input.term_months,
        )?;
        let total_payment = monthly_payment * input.term_months as f64;
        let ratio = compute_debt_ratio(
            input.current_monthly_debt,
            monthly_payment,
            input.monthly_income,
        )?;
        let decision = classify_with(ratio, &self.rules);

        debug!(
            "Quote: principal={:.2} rate={} term={} payment={:.2} ratio={:.2}% decision={}",
            input.principal, input.annual_rate_percent, input.term_months, monthly_payment, ratio, decision
        );

        Ok(LoanQuoteResult {
            monthly_payment,
            total_payment,
            debt_to_income_ratio_percent: ratio,
            decision,
        })
    }
}
