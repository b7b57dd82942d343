//! Registration eligibility rules
//!
//! The credit-application service refuses to register a request unless the
//! affiliate and the requested figures pass these checks. Like the risk
//! score, the result is a preview: the submission gate does not consult it.

use crate::error::EligibilityError;
use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const MIN_AFFILIATION_MONTHS: i64 = 6;
pub const MIN_CREDIT_AMOUNT: Decimal = dec!(1000000);
pub const MAX_CREDIT_AMOUNT: Decimal = dec!(50000000);
pub const MIN_TERM_MONTHS: u32 = 6;
pub const MAX_TERM_MONTHS: u32 = 60;
/// Credit limit as a multiple of monthly salary
pub const SALARY_MULTIPLIER: Decimal = dec!(10);

/// Membership status of an affiliate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffiliateStatus {
    #[default]
    Active,
    Inactive,
}

/// The parts of an affiliate record the registration rules look at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateProfile {
    pub salary: Decimal,
    pub affiliation_date: NaiveDate,
    #[serde(default)]
    pub status: AffiliateStatus,
}

impl AffiliateProfile {
    pub fn new(salary: Decimal, affiliation_date: NaiveDate) -> Self {
        Self {
            salary,
            affiliation_date,
            status: AffiliateStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AffiliateStatus::Active
    }

    /// Whole months of membership as of `today`
    pub fn months_affiliated(&self, today: NaiveDate) -> i64 {
        months_between(self.affiliation_date, today)
    }

    /// Largest amount this affiliate may request; `None` when the limit
    /// exceeds the representable range
    pub fn max_credit_amount(&self) -> Option<Decimal> {
        self.salary.checked_mul(SALARY_MULTIPLIER)
    }
}

/// Complete calendar months from `start` to `end`.
///
/// A month only counts once the day of month is reached again, so
/// 2024-01-31 to 2024-07-30 is five months.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    let days = end.day() as i64 - start.day() as i64;
    if months > 0 && days < 0 {
        months -= 1;
    } else if months < 0 && days > 0 {
        months += 1;
    }
    months
}

/// Stateless registration rule checker
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityChecker;

impl EligibilityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check a request as of today (UTC)
    pub fn check_now(
        &self,
        affiliate: &AffiliateProfile,
        requested_amount: Decimal,
        term_months: u32,
        has_pending_application: bool,
    ) -> Result<(), EligibilityError> {
        let today = Utc::now().date_naive();
        self.check(affiliate, requested_amount, term_months, has_pending_application, today)
    }

    /// Run every registration rule, reporting the first one that fails.
    ///
    /// Order: affiliation time, amount range, term range, affiliate limit,
    /// then any application already pending.
    pub fn check(
        &self,
        affiliate: &AffiliateProfile,
        requested_amount: Decimal,
        term_months: u32,
        has_pending_application: bool,
        today: NaiveDate,
    ) -> Result<(), EligibilityError> {
        info!(
            "Checking eligibility: amount={} term={} affiliated_since={}",
            requested_amount, term_months, affiliate.affiliation_date
        );

        let months = affiliate.months_affiliated(today);
        if months < MIN_AFFILIATION_MONTHS {
            return Err(EligibilityError::InsufficientAffiliationTime {
                months,
                required: MIN_AFFILIATION_MONTHS,
            });
        }

        if requested_amount < MIN_CREDIT_AMOUNT {
            return Err(EligibilityError::AmountTooLow {
                amount: requested_amount,
                min: MIN_CREDIT_AMOUNT,
            });
        }
        if requested_amount > MAX_CREDIT_AMOUNT {
            return Err(EligibilityError::AmountTooHigh {
                amount: requested_amount,
                max: MAX_CREDIT_AMOUNT,
            });
        }

        if term_months < MIN_TERM_MONTHS {
            return Err(EligibilityError::TermTooShort {
                term: term_months,
                min: MIN_TERM_MONTHS,
            });
        }
        if term_months > MAX_TERM_MONTHS {
            return Err(EligibilityError::TermTooLong {
                term: term_months,
                max: MAX_TERM_MONTHS,
            });
        }

        if !affiliate.is_active() {
            return Err(EligibilityError::InactiveAffiliate);
        }
        if let Some(limit) = affiliate.max_credit_amount() {
            if requested_amount > limit {
                return Err(EligibilityError::ExceedsAffiliateLimit {
                    requested: requested_amount,
                    limit,
                });
            }
        }

        if has_pending_application {
            return Err(EligibilityError::PendingApplicationExists);
        }

        debug!("All registration rules passed");
        Ok(())
    }
}
