//! Quote runner for batch affordability checks
//!
//! Holds one engine and fans quotes out across threads. Each quote is pure,
//! so results come back in input order with no coordination.

use crate::application::{GateOutcome, LoanApplication, SubmissionGate};
use crate::error::{ApplicationError, QuoteError};
use crate::quote::{Decision, LoanQuoteInput, LoanQuoteResult, QuoteEngine};
use crate::rules::AffordabilityRules;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

/// Pre-configured runner for batch quoting
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::new(AffordabilityRules::from_csv()?);
/// let results = runner.run_batch(&inputs);
/// println!("{:?}", QuoteRunner::summarize(&results));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteRunner {
    engine: QuoteEngine,
}

impl QuoteRunner {
    pub fn new(rules: AffordabilityRules) -> Self {
        Self {
            engine: QuoteEngine::new(rules),
        }
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Quote a single input
    pub fn run(&self, input: &LoanQuoteInput) -> Result<LoanQuoteResult, QuoteError> {
        self.engine.quote(input)
    }

    /// Quote many inputs in parallel, preserving order
    pub fn run_batch(&self, inputs: &[LoanQuoteInput]) -> Vec<Result<LoanQuoteResult, QuoteError>> {
        let results: Vec<_> = inputs.par_iter().map(|input| self.engine.quote(input)).collect();
        info!("Quoted {} inputs", results.len());
        results
    }

    /// Run many applications through the submission gate in parallel, preserving order
    pub fn gate_batch(&self, applications: &[LoanApplication]) -> Vec<Result<GateOutcome, ApplicationError>> {
        let gate = SubmissionGate::new(self.engine);
        let outcomes: Vec<_> = applications.par_iter().map(|app| gate.check(app)).collect();
        let blocked = outcomes
            .iter()
            .filter(|o| matches!(o, Ok(GateOutcome::Blocked { .. })))
            .count();
        info!("Gated {} applications, {} blocked", outcomes.len(), blocked);
        outcomes
    }

    /// Count decisions and invalid inputs across a batch
    pub fn summarize(results: &[Result<LoanQuoteResult, QuoteError>]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for result in results {
            match result {
                Ok(quote) => match quote.decision {
                    Decision::Acceptable => summary.acceptable += 1,
                    Decision::WarnHighRatio => summary.warn_high_ratio += 1,
                    Decision::RejectRatioExceeded => summary.reject_ratio_exceeded += 1,
                },
                Err(_) => summary.invalid += 1,
            }
        }
        summary.total = results.len();
        summary
    }
}

/// Decision counts for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub acceptable: usize,
    pub warn_high_ratio: usize,
    pub reject_ratio_exceeded: usize,
    pub invalid: usize,
}
