//! Two-tier debt-to-income classification

use crate::rules::AffordabilityRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy classification of a quote's debt-to-income ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// At or below the warning threshold
    Acceptable,
    /// Above the warning threshold, at or below the ceiling; shown but not blocking
    WarnHighRatio,
    /// Above the ceiling; submission must be blocked before contacting the backend
    RejectRatioExceeded,
}

impl Decision {
    /// Whether a request with this decision may be sent to the backend
    pub fn allows_submission(&self) -> bool {
        !matches!(self, Decision::RejectRatioExceeded)
    }

    /// Whether the preview should flag the ratio
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Decision::Acceptable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Acceptable => "ACCEPTABLE",
            Decision::WarnHighRatio => "WARN_HIGH_RATIO",
            Decision::RejectRatioExceeded => "REJECT_RATIO_EXCEEDED",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a ratio (in percent) against the standard 40% / 50% thresholds
pub fn classify(ratio_percent: f64) -> Decision {
    classify_with(ratio_percent, &AffordabilityRules::default())
}

/// Classify a ratio (in percent) against the given thresholds.
///
/// Both comparisons are strict: a ratio exactly on a threshold does not cross it.
/// A NaN or infinite ratio is never acceptable and classifies as rejected.
pub fn classify_with(ratio_percent: f64, rules: &AffordabilityRules) -> Decision {
    if !ratio_percent.is_finite() || ratio_percent > rules.max_ratio_percent {
        Decision::RejectRatioExceeded
    } else if ratio_percent > rules.warn_ratio_percent {
        Decision::WarnHighRatio
    } else {
        Decision::Acceptable
    }
}
