//! Loan affordability engine: payment, debt-to-income ratio and decision

mod payment;
mod classify;
mod engine;

pub use payment::{compute_monthly_payment, compute_debt_ratio, periodic_rate};
pub use classify::{classify, classify_with, Decision};
pub use engine::{QuoteEngine, LoanQuoteInput, LoanQuoteResult};
