//! Period resolution errors.

use chrono::NaiveDate;
use thiserror::Error;

use crate::period::types::Period;

/// Errors that can occur while resolving a payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month number outside 1..=12.
    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    /// Year cannot be represented as a calendar date.
    #[error("Year {0} is out of range")]
    YearOutOfRange(i32),

    /// End date precedes start date.
    #[error("End date {end} is before start date {start}")]
    InvalidRange {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },

    /// Date range spans more than one month under strict mode.
    #[error("Dates {start} and {end} fall in different periods ({start_period} and {end_period})")]
    CrossPeriod {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
        /// Period of the start date.
        start_period: Period,
        /// Period of the end date.
        end_period: Period,
    },

    /// Period label could not be parsed.
    #[error("Unrecognized period label: {0}")]
    UnrecognizedLabel(String),
}

impl PeriodError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::YearOutOfRange(_) => "YEAR_OUT_OF_RANGE",
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::CrossPeriod { .. } => "CROSS_PERIOD",
            Self::UnrecognizedLabel(_) => "UNRECOGNIZED_PERIOD_LABEL",
        }
    }
}

impl From<PeriodError> for payroll_id_shared::AppError {
    fn from(err: PeriodError) -> Self {
        Self::Validation(err.to_string())
    }
}
