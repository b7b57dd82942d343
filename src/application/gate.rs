//! Client-side submission gate
//!
//! Decides whether a loan request may be sent to the backend. The backend
//! re-evaluates every application on its own; this gate only stops requests
//! that are certain to breach the debt-to-income ceiling.

use super::data::{CreateApplicationRequest, LoanApplication};
use crate::error::ApplicationError;
use crate::quote::{Decision, LoanQuoteResult, QuoteEngine};
use log::{debug, warn};
use std::fmt;

/// Result of running a request through the gate
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Safe to send; carries the payload and the quote shown to the user
    Ready {
        request: CreateApplicationRequest,
        quote: LoanQuoteResult,
    },
    /// Ratio above the ceiling; the create-application call must not be made
    Blocked {
        ratio_percent: f64,
        max_ratio_percent: f64,
        quote: LoanQuoteResult,
    },
}

impl GateOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, GateOutcome::Ready { .. })
    }

    pub fn quote(&self) -> &LoanQuoteResult {
        match self {
            GateOutcome::Ready { quote, .. } | GateOutcome::Blocked { quote, .. } => quote,
        }
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOutcome::Ready { quote, .. } => write!(
                f,
                "ready to submit (debt-to-income ratio {:.2}%, {})",
                quote.debt_to_income_ratio_percent, quote.decision
            ),
            GateOutcome::Blocked {
                ratio_percent,
                max_ratio_percent,
                ..
            } => write!(
                f,
                "debt-to-income ratio is {:.2}%; the maximum allowed is {}%",
                ratio_percent, max_ratio_percent
            ),
        }
    }
}

/// Gate wrapping a quote engine
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionGate {
    engine: QuoteEngine,
}

impl SubmissionGate {
    pub fn new(engine: QuoteEngine) -> Self {
        Self { engine }
    }

    /// Validate, quote and decide whether the request may be submitted
    pub fn check(&self, application: &LoanApplication) -> Result<GateOutcome, ApplicationError> {
        if application.trimmed_purpose().is_empty() {
            return Err(ApplicationError::MissingPurpose);
        }

        let quote = self.engine.quote(&application.quote_input())?;

        if quote.decision == Decision::RejectRatioExceeded {
            let max_ratio_percent = self.engine.rules().max_ratio_percent;
            warn!(
                "Blocking submission: debt-to-income ratio {:.2}% exceeds {}%",
                quote.debt_to_income_ratio_percent, max_ratio_percent
            );
            return Ok(GateOutcome::Blocked {
                ratio_percent: quote.debt_to_income_ratio_percent,
                max_ratio_percent,
                quote,
            });
        }

        debug!("Submission allowed with decision {}", quote.decision);
        Ok(GateOutcome::Ready {
            request: CreateApplicationRequest::from(application),
            quote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;

    #[test]
    fn test_ready_when_acceptable() {
        let gate = SubmissionGate::default();
        let app = LoanApplication::new(2_000_000.0, 10, 0.0, 1_000_000.0, 0.0, "Car");

        let outcome = gate.check(&app).unwrap();
        assert!(outcome.is_ready());
        assert_eq!(outcome.quote().decision, Decision::Acceptable);
        match outcome {
            GateOutcome::Ready { request, .. } => assert_eq!(request.purpose, "Car"),
            other => panic!("expected ready, got {:?}", other),
        }
    }

    #[test]
    fn test_warning_does_not_block() {
        let gate = SubmissionGate::default();
        let app = LoanApplication::new(4_500_000.0, 10, 0.0, 1_000_000.0, 0.0, "Tuition");

        let outcome = gate.check(&app).unwrap();
        assert!(outcome.is_ready());
        assert_eq!(outcome.quote().decision, Decision::WarnHighRatio);
    }

    #[test]
    fn test_ceiling_exactly_is_not_blocked() {
        let gate = SubmissionGate::default();
        let app = LoanApplication::new(3_000_000.0, 10, 0.0, 1_000_000.0, 200_000.0, "Roof");

        let outcome = gate.check(&app).unwrap();
        assert!(outcome.is_ready());
        assert_eq!(outcome.quote().debt_to_income_ratio_percent, 50.0);
    }

    #[test]
    fn test_blocked_above_ceiling() {
        let gate = SubmissionGate::default();
        let app = LoanApplication::new(3_000_000.0, 10, 0.0, 1_000_000.0, 210_000.0, "Roof");

        let outcome = gate.check(&app).unwrap();
        assert!(!outcome.is_ready());
        assert_eq!(
            outcome.to_string(),
            "debt-to-income ratio is 51.00%; the maximum allowed is 50%"
        );
    }

    #[test]
    fn test_blank_purpose_rejected_before_quoting() {
        let gate = SubmissionGate::default();
        // Income is invalid too; the purpose check runs first
        let app = LoanApplication::new(1_000_000.0, 12, 1.0, 0.0, 0.0, "   ");
        assert!(matches!(gate.check(&app), Err(ApplicationError::MissingPurpose)));
    }

    #[test]
    fn test_invalid_figures_surface_quote_error() {
        let gate = SubmissionGate::default();
        let app = LoanApplication::new(1_000_000.0, 0, 1.0, 2_000_000.0, 0.0, "Travel");
        assert!(matches!(
            gate.check(&app),
            Err(ApplicationError::Quote(QuoteError::InvalidTerm(0)))
        ));
    }
}
