//! Affordability rules: the debt-to-income thresholds the engine classifies against

pub mod loader;

use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display-time soft warning: ratios strictly above this are flagged but not blocked
pub const WARN_RATIO_PERCENT: f64 = 40.0;

/// Submission-time hard ceiling: ratios strictly above this block submission
pub const MAX_RATIO_PERCENT: f64 = 50.0;

/// Debt-to-income thresholds, in percent of monthly income
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityRules {
    /// Soft warning threshold shown when previewing a quote
    pub warn_ratio_percent: f64,

    /// Hard ceiling enforced before contacting the backend
    pub max_ratio_percent: f64,
}

impl Default for AffordabilityRules {
    fn default() -> Self {
        Self {
            warn_ratio_percent: WARN_RATIO_PERCENT,
            max_ratio_percent: MAX_RATIO_PERCENT,
        }
    }
}

impl AffordabilityRules {
    /// Build rules from explicit thresholds, rejecting a warning above the ceiling
    pub fn new(warn_ratio_percent: f64, max_ratio_percent: f64) -> Result<Self, RulesError> {
        let rules = Self {
            warn_ratio_percent,
            max_ratio_percent,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from the default location (data/rules/affordability.csv)
    pub fn from_csv() -> Result<Self, RulesError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RULES_PATH))
    }

    /// Load rules from a specific CSV file; names missing from the file keep their defaults
    pub fn from_csv_path(path: &Path) -> Result<Self, RulesError> {
        let mut rules = Self::default();
        for (name, value) in loader::load_rule_values(path)? {
            match name.as_str() {
                "warn_ratio_percent" => rules.warn_ratio_percent = value,
                "max_ratio_percent" => rules.max_ratio_percent = value,
                _ => return Err(RulesError::UnknownRule(name)),
            }
        }
        rules.validate()?;
        Ok(rules)
    }

    fn validate(&self) -> Result<(), RulesError> {
        let finite = self.warn_ratio_percent.is_finite() && self.max_ratio_percent.is_finite();
        if !finite || self.warn_ratio_percent < 0.0 || self.warn_ratio_percent > self.max_ratio_percent {
            return Err(RulesError::InvalidThresholds {
                warn: self.warn_ratio_percent,
                max: self.max_ratio_percent,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rules_match_constants() {
        let rules = AffordabilityRules::default();
        assert_eq!(rules.warn_ratio_percent, 40.0);
        assert_eq!(rules.max_ratio_percent, 50.0);
    }

    #[test]
    fn test_warning_above_ceiling_rejected() {
        let result = AffordabilityRules::new(55.0, 50.0);
        assert!(matches!(result, Err(RulesError::InvalidThresholds { .. })));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,value").unwrap();
        writeln!(file, "max_ratio_percent,45").unwrap();

        let rules = AffordabilityRules::from_csv_path(file.path()).unwrap();
        assert_eq!(rules.warn_ratio_percent, WARN_RATIO_PERCENT);
        assert_eq!(rules.max_ratio_percent, 45.0);
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,value").unwrap();
        writeln!(file, "min_income,1000000").unwrap();

        let result = AffordabilityRules::from_csv_path(file.path());
        assert!(matches!(result, Err(RulesError::UnknownRule(name)) if name == "min_income"));
    }

    #[test]
    fn test_load_shipped_rules() {
        let rules = AffordabilityRules::from_csv().expect("Failed to load shipped rules");
        assert_eq!(rules, AffordabilityRules::default());
    }
}
