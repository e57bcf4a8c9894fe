//! PPh 21 error types.

use payroll_id_shared::types::EmployeeId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::period::Period;

/// Errors that can occur while computing or aggregating PPh 21.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// An effective-rate line carries no rate.
    #[error("Tax line for employee {employee_id} uses the effective rate method but has no rate")]
    MissingRate {
        /// Employee on the malformed line.
        employee_id: EmployeeId,
    },

    /// Annual corrections only apply to the December period.
    #[error("Annual tax corrections are only allowed in December, got {period}")]
    CorrectionOutsideDecember {
        /// Period the corrections were supplied for.
        period: Period,
    },

    /// Income or tax amount cannot be negative.
    #[error("Negative {field} {amount} for employee {employee_id}")]
    NegativeAmount {
        /// Employee.
        employee_id: EmployeeId,
        /// Which amount was negative.
        field: &'static str,
        /// The rejected value.
        amount: Decimal,
    },

    /// Tax status code not recognized.
    #[error("Unknown tax status: {0}")]
    UnknownStatus(String),
}

impl TaxError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRate { .. } => "MISSING_TAX_RATE",
            Self::CorrectionOutsideDecember { .. } => "CORRECTION_OUTSIDE_DECEMBER",
            Self::NegativeAmount { .. } => "NEGATIVE_TAX_AMOUNT",
            Self::UnknownStatus(_) => "UNKNOWN_TAX_STATUS",
        }
    }
}

impl From<TaxError> for payroll_id_shared::AppError {
    fn from(err: TaxError) -> Self {
        match err {
            TaxError::CorrectionOutsideDecember { .. } => Self::BusinessRule(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
