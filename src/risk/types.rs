//! Risk evaluation request and result types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Figures the risk service scores on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEvaluationRequest {
    pub document_number: String,
    pub requested_amount: Decimal,
    pub term_months: u32,
    pub monthly_income: Decimal,
    #[serde(default)]
    pub current_debt: Decimal,
}

/// Risk band derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 700 {
            RiskLevel::Low
        } else if score >= 500 {
            RiskLevel::Medium
        } else if score >= 300 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY_HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation attached to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Approve,
    ManualReview,
    Reject,
}

impl Recommendation {
    pub fn from_score(score: u32) -> Self {
        if score >= 700 {
            Recommendation::Approve
        } else if score >= 300 {
            Recommendation::ManualReview
        } else {
            Recommendation::Reject
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "APPROVE",
            Recommendation::ManualReview => "MANUAL_REVIEW",
            Recommendation::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a risk evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEvaluation {
    pub document_number: String,

    /// Score in 0..=1000
    pub score: u32,

    pub risk_level: RiskLevel,

    pub recommendation: Recommendation,

    /// Human-readable factors in the order they were assessed
    pub risk_factors: Vec<String>,

    pub evaluated_at: DateTime<Utc>,
}

impl RiskEvaluation {
    /// Evaluation summary in the form stored on the application record
    pub fn comments(&self) -> String {
        let factors = if self.risk_factors.is_empty() {
            "None".to_string()
        } else {
            self.risk_factors.join(", ")
        };
        format!(
            "Credit Score: {} | Risk Level: {} | Recommendation: {} | Factors: {}",
            self.score, self.risk_level, self.recommendation, factors
        )
    }
}
