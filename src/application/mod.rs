//! Loan applications, status lifecycle, submission gate and batch loading

mod data;
mod gate;
pub mod loader;

pub use data::{LoanApplication, ApplicationStatus, ApplicationRecord, CreateApplicationRequest};
pub use gate::{SubmissionGate, GateOutcome};
pub use loader::{load_applications, load_applications_from_reader};
