//! Amortized payment and debt-to-income ratio formulas

use crate::error::QuoteError;

/// Convert the stated rate percentage into the per-installment rate.
///
/// The percentage is divided by 100 and applied as the monthly rate as-is.
/// There is no further division by 12, so a stated 12 means 12% per month.
/// Existing quotes and the submission gate depend on this conversion.
pub fn periodic_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0
}

/// Calculate the level monthly installment for a loan
///
/// # Arguments
/// * `principal` - Requested amount, must be > 0
/// * `annual_rate_percent` - Rate as a percentage figure (12.5 = 12.5), must be >= 0
/// * `term_months` - Number of monthly installments, must be >= 1
///
/// A zero rate amortizes straight-line (`principal / term_months`); otherwise
/// the standard annuity formula is used, evaluated as
/// `principal * r / (1 - (1 + r)^-n)` through `ln_1p`/`exp_m1` so that long
/// terms approach `principal * r` and tiny rates approach `principal / n`.
pub fn compute_monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<f64, QuoteError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(QuoteError::InvalidPrincipal(principal));
    }
    if term_months < 1 {
        return Err(QuoteError::InvalidTerm(term_months));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(QuoteError::InvalidRate(annual_rate_percent));
    }

    let rate = periodic_rate(annual_rate_percent);
    let n = term_months as f64;

    if rate == 0.0 {
        return Ok(principal / n);
    }

    // 1 - (1 + r)^-n without forming (1 + r)^n
    let discount = -(-n * rate.ln_1p()).exp_m1();
    let payment = principal * rate / discount;
    if !payment.is_finite() {
        return Err(QuoteError::Overflow("monthly payment"));
    }
    Ok(payment)
}

/// Calculate the debt-to-income ratio in percent, including the new installment
pub fn compute_debt_ratio(
    current_monthly_debt: f64,
    monthly_payment: f64,
    monthly_income: f64,
) -> Result<f64, QuoteError> {
    if !monthly_income.is_finite() || monthly_income <= 0.0 {
        return Err(QuoteError::InvalidIncome(monthly_income));
    }
    if !current_monthly_debt.is_finite() || current_monthly_debt < 0.0 {
        return Err(QuoteError::InvalidDebt(current_monthly_debt));
    }
    if !monthly_payment.is_finite() || monthly_payment < 0.0 {
        return Err(QuoteError::InvalidPayment(monthly_payment));
    }

    let ratio = (current_monthly_debt + monthly_payment) / monthly_income * 100.0;
    if !ratio.is_finite() {
        return Err(QuoteError::Overflow("debt-to-income ratio"));
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = compute_monthly_payment(5_000_000.0, 0.0, 10).unwrap();
        assert_eq!(payment, 500_000.0);

        for (principal, term) in [(1.0, 1), (1_234_567.0, 7), (999.99, 360)] {
            let payment = compute_monthly_payment(principal, 0.0, term).unwrap();
            assert_eq!(payment, principal / term as f64);
        }
    }

    #[test]
    fn test_reference_quote() {
        // 10,000,000 at a stated 12 over 12 installments: r = 0.12 per month
        let payment = compute_monthly_payment(10_000_000.0, 12.0, 12).unwrap();

        let growth = 1.12_f64.powi(12);
        let expected = 10_000_000.0 * (0.12 * growth) / (growth - 1.0);
        assert_relative_eq!(payment, expected, max_relative = 1e-6);
        assert_relative_eq!(payment, 1_614_368.08, max_relative = 1e-6);
    }

    #[test]
    fn test_rate_is_not_divided_by_twelve() {
        // A conventional annual-to-monthly conversion would use 0.01 per month here
        // and give ~88,848.79. The stated figure is applied per month instead.
        let payment = compute_monthly_payment(1_000_000.0, 12.0, 12).unwrap();
        let conventional = {
            let r = 0.12 / 12.0;
            let growth = (1.0_f64 + r).powi(12);
            1_000_000.0 * (r * growth) / (growth - 1.0)
        };

        assert_relative_eq!(periodic_rate(12.0), 0.12);
        assert!(payment > conventional * 1.5);
    }

    #[test]
    fn test_interest_never_negative() {
        for (principal, rate, term) in [
            (1_000.0, 0.5, 1),
            (50_000.0, 1.0, 24),
            (10_000_000.0, 12.0, 60),
            (3_000_000.0, 2.75, 360),
        ] {
            let payment = compute_monthly_payment(principal, rate, term).unwrap();
            assert!(payment.is_finite());
            assert!(payment * term as f64 >= principal);
        }
    }

    #[test]
    fn test_long_term_approaches_interest_only() {
        // (1.12)^10000 is far beyond f64 range
        let payment = compute_monthly_payment(1_000_000.0, 12.0, 10_000).unwrap();
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 120_000.0, max_relative = 1e-12);
        assert!(payment * 10_000.0 >= 1_000_000.0);
    }

    #[test]
    fn test_tiny_rate_approaches_straight_line() {
        // 1 + r rounds to exactly 1.0 here
        let payment = compute_monthly_payment(1_000_000.0, 1e-15, 12).unwrap();
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 1_000_000.0 / 12.0, max_relative = 1e-9);
        assert!(payment * 12.0 >= 1_000_000.0 * (1.0 - 1e-12));

        let payment = compute_monthly_payment(1_000_000.0, 1e-9, 12).unwrap();
        assert!(payment.is_finite());
        assert!(payment * 12.0 >= 1_000_000.0);
    }

    #[test]
    fn test_unrepresentable_payment_is_an_error() {
        assert_eq!(
            compute_monthly_payment(f64::MAX, 1e6, 1),
            Err(QuoteError::Overflow("monthly payment"))
        );
    }

    #[test]
    fn test_single_installment_with_interest() {
        let payment = compute_monthly_payment(1_000.0, 10.0, 1).unwrap();
        assert_relative_eq!(payment, 1_100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_repeat_calls_identical() {
        let a = compute_monthly_payment(7_500_000.0, 1.8, 48).unwrap();
        let b = compute_monthly_payment(7_500_000.0, 1.8, 48).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_invalid_payment_inputs() {
        assert_eq!(compute_monthly_payment(0.0, 1.0, 12), Err(QuoteError::InvalidPrincipal(0.0)));
        assert_eq!(compute_monthly_payment(-5.0, 1.0, 12), Err(QuoteError::InvalidPrincipal(-5.0)));
        assert!(matches!(
            compute_monthly_payment(f64::NAN, 1.0, 12),
            Err(QuoteError::InvalidPrincipal(_))
        ));
        assert_eq!(compute_monthly_payment(1_000.0, 1.0, 0), Err(QuoteError::InvalidTerm(0)));
        assert_eq!(compute_monthly_payment(1_000.0, -0.5, 12), Err(QuoteError::InvalidRate(-0.5)));
        assert!(matches!(
            compute_monthly_payment(1_000.0, f64::INFINITY, 12),
            Err(QuoteError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_debt_ratio() {
        let ratio = compute_debt_ratio(200_000.0, 300_000.0, 1_000_000.0).unwrap();
        assert_eq!(ratio, 50.0);

        let ratio = compute_debt_ratio(0.0, 2_500_000.0, 1_000_000.0).unwrap();
        assert_eq!(ratio, 250.0);
    }

    #[test]
    fn test_debt_ratio_rejects_bad_income() {
        assert_eq!(compute_debt_ratio(0.0, 100.0, 0.0), Err(QuoteError::InvalidIncome(0.0)));
        assert_eq!(
            compute_debt_ratio(0.0, 100.0, -1_000.0),
            Err(QuoteError::InvalidIncome(-1_000.0))
        );
        assert!(matches!(
            compute_debt_ratio(0.0, 100.0, f64::NAN),
            Err(QuoteError::InvalidIncome(_))
        ));
    }

    #[test]
    fn test_debt_ratio_rejects_negative_components() {
        assert_eq!(
            compute_debt_ratio(-1.0, 100.0, 1_000.0),
            Err(QuoteError::InvalidDebt(-1.0))
        );
        assert_eq!(
            compute_debt_ratio(0.0, -100.0, 1_000.0),
            Err(QuoteError::InvalidPayment(-100.0))
        );
    }

    #[test]
    fn test_debt_ratio_overflow_is_an_error() {
        assert_eq!(
            compute_debt_ratio(f64::MAX, f64::MAX, 1.0),
            Err(QuoteError::Overflow("debt-to-income ratio"))
        );
        assert_eq!(
            compute_debt_ratio(f64::MAX, 0.0, 0.5),
            Err(QuoteError::Overflow("debt-to-income ratio"))
        );
    }
}
