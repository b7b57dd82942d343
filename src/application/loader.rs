//! Load loan requests from CSV
//!
//! Columns follow the create-application payload:
//! `requestedAmount,termMonths,interestRate,monthlyIncome,currentDebt,purpose`
//! with an optional leading `affiliateId`.

use super::LoanApplication;
use crate::error::ApplicationError;
use csv::{Reader, Trim};
use std::path::Path;

/// Raw CSV row; blank debt is read as no existing debt
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "affiliateId", default)]
    affiliate_id: Option<u64>,
    #[serde(rename = "requestedAmount")]
    requested_amount: f64,
    #[serde(rename = "termMonths")]
    term_months: u32,
    #[serde(rename = "interestRate")]
    interest_rate: f64,
    #[serde(rename = "monthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "currentDebt", default)]
    current_debt: Option<f64>,
    #[serde(rename = "purpose", default)]
    purpose: String,
}

impl CsvRow {
    fn into_application(self) -> LoanApplication {
        LoanApplication {
            affiliate_id: self.affiliate_id,
            requested_amount: self.requested_amount,
            term_months: self.term_months,
            interest_rate: self.interest_rate,
            monthly_income: self.monthly_income,
            current_debt: self.current_debt.unwrap_or(0.0),
            purpose: self.purpose,
        }
    }
}

/// Load all applications from a CSV file
pub fn load_applications<P: AsRef<Path>>(path: P) -> Result<Vec<LoanApplication>, ApplicationError> {
    let file = std::fs::File::open(path)?;
    load_applications_from_reader(file)
}

/// Load applications from any reader (e.g., string buffer, stdin)
pub fn load_applications_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<LoanApplication>, ApplicationError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<LoanApplication>, ApplicationError> {
    let mut applications = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        applications.push(row.into_application());
    }

    Ok(applications)
}
