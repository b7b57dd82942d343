//! Application data structures matching the create-application payload

use crate::error::ApplicationError;
use crate::quote::LoanQuoteInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loan request as entered by an affiliate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    /// Affiliate the request belongs to, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<u64>,

    pub requested_amount: f64,

    pub term_months: u32,

    /// Stated rate as a percentage figure
    pub interest_rate: f64,

    pub monthly_income: f64,

    #[serde(default)]
    pub current_debt: f64,

    #[serde(default)]
    pub purpose: String,
}

impl LoanApplication {
    pub fn new(
        requested_amount: f64,
        term_months: u32,
        interest_rate: f64,
        monthly_income: f64,
        current_debt: f64,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            affiliate_id: None,
            requested_amount,
            term_months,
            interest_rate,
            monthly_income,
            current_debt,
            purpose: purpose.into(),
        }
    }

    pub fn with_affiliate(mut self, affiliate_id: u64) -> Self {
        self.affiliate_id = Some(affiliate_id);
        self
    }

    /// Figures the affordability engine quotes on
    pub fn quote_input(&self) -> LoanQuoteInput {
        LoanQuoteInput::new(
            self.requested_amount,
            self.interest_rate,
            self.term_months,
            self.monthly_income,
            self.current_debt,
        )
    }

    /// Purpose with surrounding whitespace removed
    pub fn trimmed_purpose(&self) -> &str {
        self.purpose.trim()
    }
}

/// Body of the backend's create-application call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub requested_amount: f64,
    pub term_months: u32,
    pub interest_rate: f64,
    pub monthly_income: f64,
    pub current_debt: f64,
    pub purpose: String,
}

impl From<&LoanApplication> for CreateApplicationRequest {
    fn from(app: &LoanApplication) -> Self {
        Self {
            requested_amount: app.requested_amount,
            term_months: app.term_months,
            interest_rate: app.interest_rate,
            monthly_income: app.monthly_income,
            current_debt: app.current_debt,
            purpose: app.trimmed_purpose().to_string(),
        }
    }
}

/// Lifecycle status of a submitted application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted, awaiting evaluation
    Pending,
    /// Scored into the manual review band
    InReview,
    Approved,
    Rejected,
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

impl ApplicationStatus {
    /// Status the backend assigns from a 0-1000 risk score
    pub fn from_score(score: u32) -> Self {
        if score >= 700 {
            ApplicationStatus::Approved
        } else if score < 400 {
            ApplicationStatus::Rejected
        } else {
            ApplicationStatus::InReview
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::InReview => "IN_REVIEW",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted application and its review state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: u64,
    pub application: LoanApplication,
    pub status: ApplicationStatus,
    pub application_date: DateTime<Utc>,
    #[serde(default)]
    pub evaluation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub evaluation_comments: Option<String>,
}

impl ApplicationRecord {
    /// Record a new submission as pending
    pub fn submitted(id: u64, application: LoanApplication) -> Self {
        Self {
            id,
            application,
            status: ApplicationStatus::Pending,
            application_date: Utc::now(),
            evaluation_date: None,
            evaluation_comments: None,
        }
    }

    /// Analyst approval, allowed while pending or in review
    pub fn approve(&mut self, comments: Option<String>) -> Result<(), ApplicationError> {
        self.transition(ApplicationStatus::Approved, comments)
    }

    /// Analyst rejection, allowed while pending or in review
    pub fn reject(&mut self, comments: Option<String>) -> Result<(), ApplicationError> {
        self.transition(ApplicationStatus::Rejected, comments)
    }

    /// Apply a score-driven status; only pending applications are scored
    pub fn apply_score(&mut self, score: u32, comments: String) -> Result<ApplicationStatus, ApplicationError> {
        let status = ApplicationStatus::from_score(score);
        if self.status != ApplicationStatus::Pending {
            return Err(ApplicationError::InvalidStatusTransition { from: self.status, to: status });
        }
        self.transition(status, Some(comments))?;
        Ok(status)
    }

    fn transition(&mut self, to: ApplicationStatus, comments: Option<String>) -> Result<(), ApplicationError> {
        if self.status.is_final() {
            return Err(ApplicationError::InvalidStatusTransition { from: self.status, to });
        }
        self.status = to;
        self.evaluation_date = Some(Utc::now());
        if comments.is_some() {
            self.evaluation_comments = comments;
        }
        Ok(())
    }
}
