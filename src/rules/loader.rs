//! CSV-based rules loader
//!
//! Reads `name,value` pairs from data/rules/affordability.csv

use crate::error::RulesError;
use std::fs::File;
use std::path::Path;

/// Default path to the affordability rules file
pub const DEFAULT_RULES_PATH: &str = "data/rules/affordability.csv";

/// Load raw rule values in file order
pub fn load_rule_values(path: &Path) -> Result<Vec<(String, f64)>, RulesError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut values = Vec::new();

    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default().trim().to_string();
        let raw = record
            .get(1)
            .ok_or_else(|| RulesError::InvalidValue {
                name: name.clone(),
                value: String::new(),
            })?
            .trim();
        let value: f64 = raw.parse().map_err(|_| RulesError::InvalidValue {
            name: name.clone(),
            value: raw.to_string(),
        })?;
        values.push((name, value));
    }

    Ok(values)
}
