//! Credit score calculation
//!
//! The score starts from a per-document base in 400..=600 and adds four
//! weighted components:
//! - debt-to-income ratio (±200)
//! - income level (+125 / -75)
//! - loan amount relative to annual income (±100)
//! - term length (+75 / -50)
//!
//! The debt ratio here uses an interest-free installment (`amount / months`),
//! unlike the affordability engine, because that is how the scoring service
//! defines it.

use super::types::{Recommendation, RiskEvaluation, RiskEvaluationRequest, RiskLevel};
use crate::error::RiskError;
use chrono::Utc;
use log::{debug, info};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const MAX_SCORE: i32 = 1000;
const MIN_SCORE: i32 = 0;
const DEFAULT_BASE_SCORE: i32 = 500;

const EXCELLENT_DEBT_RATIO: Decimal = dec!(0.20);
const GOOD_DEBT_RATIO: Decimal = dec!(0.35);
const ACCEPTABLE_DEBT_RATIO: Decimal = dec!(0.50);

const LOW_INCOME_THRESHOLD: Decimal = dec!(2000000);
const MEDIUM_INCOME_THRESHOLD: Decimal = dec!(5000000);

const CONSERVATIVE_LOAN_TO_INCOME: Decimal = dec!(2);
const MODERATE_LOAN_TO_INCOME: Decimal = dec!(4);

/// 32-bit string hash over UTF-16 code units (`h = 31 * h + c`, wrapping).
///
/// Must stay bit-compatible with the scoring service so the same document
/// always lands on the same base score on both sides.
pub fn java_string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32))
}

/// Base score in 400..=600 derived from the document number; 500 when empty
pub fn document_base_score(document_number: &str) -> i32 {
    if document_number.is_empty() {
        return DEFAULT_BASE_SCORE;
    }
    // wrapping_abs and a sign-preserving remainder keep i32::MIN in step with the service
    let hash = java_string_hash(document_number);
    400 + hash.wrapping_abs() % 201
}

fn half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Stateless risk scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskEvaluator;

impl RiskEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Score a request and derive level, recommendation and factors
    pub fn evaluate(&self, request: &RiskEvaluationRequest) -> Result<RiskEvaluation, RiskError> {
        validate(request)?;
        info!("Evaluating risk for document: {}", request.document_number);

        let mut factors = Vec::new();

        let base = document_base_score(&request.document_number);

        let debt_ratio = debt_ratio(request)?;
        let debt_score = debt_ratio_score(debt_ratio, &mut factors);
        debug!("Debt ratio: {}, score contribution: {}", debt_ratio, debt_score);

        let income_score = income_score(request.monthly_income, &mut factors);
        debug!("Income score contribution: {}", income_score);

        let amount_score = loan_amount_score(request.requested_amount, request.monthly_income, &mut factors)?;
        debug!("Loan amount score contribution: {}", amount_score);

        let term_score = term_score(request.term_months, &mut factors);
        debug!("Term score contribution: {}", term_score);

        let raw = base + debt_score + income_score + amount_score + term_score;
        let score = raw.clamp(MIN_SCORE, MAX_SCORE) as u32;

        let risk_level = RiskLevel::from_score(score);
        let recommendation = Recommendation::from_score(score);

        info!(
            "Final evaluation - Score: {}, Risk: {}, Recommendation: {}",
            score, risk_level, recommendation
        );

        Ok(RiskEvaluation {
            document_number: request.document_number.clone(),
            score,
            risk_level,
            recommendation,
            risk_factors: factors,
            evaluated_at: Utc::now(),
        })
    }
}

fn validate(request: &RiskEvaluationRequest) -> Result<(), RiskError> {
    if request.requested_amount <= Decimal::ZERO {
        return Err(RiskError::InvalidAmount(request.requested_amount));
    }
    if request.term_months < 1 {
        return Err(RiskError::InvalidTerm(request.term_months));
    }
    if request.monthly_income <= Decimal::ZERO {
        return Err(RiskError::InvalidIncome(request.monthly_income));
    }
    if request.current_debt < Decimal::ZERO {
        return Err(RiskError::InvalidDebt(request.current_debt));
    }
    Ok(())
}

/// Debt ratio as a fraction (4 dp), using the interest-free installment (2 dp)
fn debt_ratio(request: &RiskEvaluationRequest) -> Result<Decimal, RiskError> {
    let installment = half_up(request.requested_amount / Decimal::from(request.term_months), 2);
    let obligations = request
        .current_debt
        .checked_add(installment)
        .ok_or(RiskError::InvalidDebt(request.current_debt))?;
    let ratio = obligations
        .checked_div(request.monthly_income)
        .ok_or(RiskError::InvalidIncome(request.monthly_income))?;
    Ok(half_up(ratio, 4))
}

fn debt_ratio_score(ratio: Decimal, factors: &mut Vec<String>) -> i32 {
    if ratio <= EXCELLENT_DEBT_RATIO {
        factors.push("Excellent debt-to-income ratio".to_string());
        200
    } else if ratio <= GOOD_DEBT_RATIO {
        factors.push("Good debt-to-income ratio".to_string());
        100
    } else if ratio <= ACCEPTABLE_DEBT_RATIO {
        factors.push("Acceptable debt-to-income ratio".to_string());
        0
    } else {
        let percent = ratio
            .checked_mul(dec!(100))
            .and_then(|p| p.trunc().to_i64())
            .unwrap_or(i64::MAX);
        factors.push(format!("High debt-to-income ratio: {}%", percent));
        -200
    }
}

fn income_score(monthly_income: Decimal, factors: &mut Vec<String>) -> i32 {
    if monthly_income >= MEDIUM_INCOME_THRESHOLD {
        factors.push("High income level".to_string());
        125
    } else if monthly_income >= LOW_INCOME_THRESHOLD {
        factors.push("Medium income level".to_string());
        50
    } else {
        factors.push("Low income level".to_string());
        -75
    }
}

fn loan_amount_score(
    amount: Decimal,
    monthly_income: Decimal,
    factors: &mut Vec<String>,
) -> Result<i32, RiskError> {
    let loan_to_income = monthly_income
        .checked_mul(dec!(12))
        .and_then(|annual| amount.checked_div(annual))
        .map(|ratio| half_up(ratio, 2))
        .ok_or(RiskError::InvalidIncome(monthly_income))?;

    if loan_to_income <= CONSERVATIVE_LOAN_TO_INCOME {
        factors.push("Conservative loan amount".to_string());
        Ok(100)
    } else if loan_to_income <= MODERATE_LOAN_TO_INCOME {
        factors.push("Moderate loan amount".to_string());
        Ok(0)
    } else {
        factors.push("High loan amount relative to annual income".to_string());
        Ok(-100)
    }
}

fn term_score(term_months: u32, factors: &mut Vec<String>) -> i32 {
    if term_months <= 12 {
        factors.push("Short-term loan (lower risk)".to_string());
        75
    } else if term_months <= 36 {
        factors.push("Medium-term loan".to_string());
        25
    } else {
        factors.push("Long-term loan (higher risk)".to_string());
        -50
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(doc: &str, amount: Decimal, term: u32, income: Decimal, debt: Decimal) -> RiskEvaluationRequest {
        RiskEvaluationRequest {
            document_number: doc.to_string(),
            requested_amount: amount,
            term_months: term,
            monthly_income: income,
            current_debt: debt,
        }
    }

    #[test]
    fn test_string_hash_matches_service() {
        assert_eq!(java_string_hash(""), 0);
        assert_eq!(java_string_hash("A"), 65);
        assert_eq!(java_string_hash("1234567890"), -2054162789);
        assert_eq!(java_string_hash("1017654321"), 765247746);
    }

    #[test]
    fn test_document_base_score() {
        assert_eq!(document_base_score(""), 500);
        assert_eq!(document_base_score("A"), 465);
        assert_eq!(document_base_score("1234567890"), 474);
        assert_eq!(document_base_score("1017654321"), 544);
        assert_eq!(document_base_score("1000021"), 400);

        for doc in ["CC-1", "98765432", "ñandú", "x"] {
            let base = document_base_score(doc);
            assert!((400..=600).contains(&base), "{} -> {}", doc, base);
        }
    }

    #[test]
    fn test_low_risk_applicant() {
        let evaluator = RiskEvaluator::new();
        let req = request("1234567890", dec!(5000000), 12, dec!(5000000), dec!(0));

        let eval = evaluator.evaluate(&req).unwrap();
        // 474 + 200 + 125 + 100 + 75
        assert_eq!(eval.score, 974);
        assert_eq!(eval.risk_level, RiskLevel::Low);
        assert_eq!(eval.recommendation, Recommendation::Approve);
        assert_eq!(
            eval.risk_factors,
            vec![
                "Excellent debt-to-income ratio",
                "High income level",
                "Conservative loan amount",
                "Short-term loan (lower risk)",
            ]
        );
    }

    #[test]
    fn test_review_band_applicant() {
        let evaluator = RiskEvaluator::new();
        // installment 416,666.67; (300,000 + 416,666.67) / 1,500,000 = 0.4778
        let req = request("1017654321", dec!(20000000), 48, dec!(1500000), dec!(300000));

        let eval = evaluator.evaluate(&req).unwrap();
        // 544 + 0 - 75 + 100 - 50
        assert_eq!(eval.score, 519);
        assert_eq!(eval.risk_level, RiskLevel::Medium);
        assert_eq!(eval.recommendation, Recommendation::ManualReview);
        assert_eq!(eval.risk_factors[0], "Acceptable debt-to-income ratio");
    }

    #[test]
    fn test_high_ratio_factor_truncates_percent() {
        let evaluator = RiskEvaluator::new();
        // (500,000 + 833,333.33) / 1,000,000 = 1.3333
        let req = request("", dec!(50000000), 60, dec!(1000000), dec!(500000));

        let eval = evaluator.evaluate(&req).unwrap();
        // 500 - 200 - 75 - 100 - 50
        assert_eq!(eval.score, 75);
        assert_eq!(eval.risk_level, RiskLevel::VeryHigh);
        assert_eq!(eval.recommendation, Recommendation::Reject);
        assert_eq!(eval.risk_factors[0], "High debt-to-income ratio: 133%");
        assert_eq!(eval.risk_factors[2], "High loan amount relative to annual income");
    }

    #[test]
    fn test_score_clamped_to_range() {
        let evaluator = RiskEvaluator::new();

        // 544 + 200 + 125 + 100 + 75 = 1044
        let best = request("1017654321", dec!(1000000), 6, dec!(6000000), dec!(0));
        assert_eq!(evaluator.evaluate(&best).unwrap().score, 1000);

        // 400 - 200 - 75 - 100 - 50 = -25
        let worst = request("1000021", dec!(90000000), 72, dec!(1000000), dec!(900000));
        assert_eq!(evaluator.evaluate(&worst).unwrap().score, 0);
    }

    #[test]
    fn test_ratio_boundaries_inclusive() {
        let mut factors = Vec::new();
        assert_eq!(debt_ratio_score(dec!(0.20), &mut factors), 200);
        assert_eq!(debt_ratio_score(dec!(0.2001), &mut factors), 100);
        assert_eq!(debt_ratio_score(dec!(0.35), &mut factors), 100);
        assert_eq!(debt_ratio_score(dec!(0.50), &mut factors), 0);
        assert_eq!(debt_ratio_score(dec!(0.5001), &mut factors), -200);
        assert_eq!(factors.last().map(String::as_str), Some("High debt-to-income ratio: 50%"));
    }

    #[test]
    fn test_extreme_figures_are_errors() {
        let evaluator = RiskEvaluator::new();

        let huge_income = request("1", dec!(1000000), 12, Decimal::MAX, dec!(0));
        assert_eq!(
            evaluator.evaluate(&huge_income),
            Err(RiskError::InvalidIncome(Decimal::MAX))
        );

        let huge_debt = request("1", dec!(1000000), 1, dec!(1000000), Decimal::MAX);
        assert_eq!(
            evaluator.evaluate(&huge_debt),
            Err(RiskError::InvalidDebt(Decimal::MAX))
        );

        let tiny_income = request("1", dec!(1000000), 12, dec!(0.0000000000000000000000000001), Decimal::MAX / dec!(2));
        assert!(matches!(
            evaluator.evaluate(&tiny_income),
            Err(RiskError::InvalidIncome(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_request() {
        let evaluator = RiskEvaluator::new();
        assert_eq!(
            evaluator.evaluate(&request("1", dec!(1000), 12, dec!(0), dec!(0))),
            Err(RiskError::InvalidIncome(dec!(0)))
        );
        assert_eq!(
            evaluator.evaluate(&request("1", dec!(1000), 0, dec!(1000), dec!(0))),
            Err(RiskError::InvalidTerm(0))
        );
        assert_eq!(
            evaluator.evaluate(&request("1", dec!(0), 12, dec!(1000), dec!(0))),
            Err(RiskError::InvalidAmount(dec!(0)))
        );
    }
}
