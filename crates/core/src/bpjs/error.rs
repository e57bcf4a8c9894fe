//! BPJS error types.

use payroll_id_shared::types::EmployeeId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::bpjs::types::ContributionCategory;

/// Errors that can occur while calculating or aggregating contributions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BpjsError {
    /// A contribution line carries a negative amount.
    #[error("Negative {category} contribution for employee {employee_id}")]
    NegativeAmount {
        /// Employee on the offending line.
        employee_id: EmployeeId,
        /// Category of the offending line.
        category: ContributionCategory,
    },

    /// Basic salary cannot be negative.
    #[error("Basic salary {salary} for employee {employee_id} is negative")]
    NegativeSalary {
        /// Employee.
        employee_id: EmployeeId,
        /// The rejected salary.
        salary: Decimal,
    },

    /// Category name not recognized.
    #[error("Unknown BPJS category: {0}")]
    UnknownCategory(String),
}

impl BpjsError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount { .. } => "NEGATIVE_CONTRIBUTION",
            Self::NegativeSalary { .. } => "NEGATIVE_SALARY",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
        }
    }
}

impl From<BpjsError> for payroll_id_shared::AppError {
    fn from(err: BpjsError) -> Self {
        Self::Validation(err.to_string())
    }
}
