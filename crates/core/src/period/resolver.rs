//! Resolves user-supplied dates into canonical payroll periods.

use chrono::NaiveDate;
use tracing::warn;

use crate::period::error::PeriodError;
use crate::period::types::{
    CrossPeriodWarning, Month, Period, PeriodInput, PeriodMode, PeriodResolution,
};

/// Stateless period resolver.
pub struct PeriodResolver;

impl PeriodResolver {
    /// Resolves any supported input into a period.
    ///
    /// # Returns
    /// * `Ok(PeriodResolution)` with a warning only for a cross-period range in `Warn` mode
    /// * `Err(PeriodError::CrossPeriod)` for a cross-period range in `Strict` mode
    /// * `Err(PeriodError::InvalidMonth)` / `Err(PeriodError::InvalidRange)` for malformed input
    pub fn resolve(input: PeriodInput, mode: PeriodMode) -> Result<PeriodResolution, PeriodError> {
        match input {
            PeriodInput::Date { date } => Ok(PeriodResolution {
                period: Period::of_date(date),
                warning: None,
            }),
            PeriodInput::YearMonth { year, month } => Ok(PeriodResolution {
                period: Period::new(year, month)?,
                warning: None,
            }),
            PeriodInput::Range { start, end } => Self::resolve_range(start, end, mode),
        }
    }

    /// Resolves a start/end pair, enforcing the single-month rule.
    pub fn resolve_range(
        start: NaiveDate,
        end: NaiveDate,
        mode: PeriodMode,
    ) -> Result<PeriodResolution, PeriodError> {
        if end < start {
            return Err(PeriodError::InvalidRange { start, end });
        }

        let start_period = Period::of_date(start);
        let end_period = Period::of_date(end);

        if start_period == end_period {
            return Ok(PeriodResolution {
                period: start_period,
                warning: None,
            });
        }

        match mode {
            PeriodMode::Strict => Err(PeriodError::CrossPeriod {
                start,
                end,
                start_period,
                end_period,
            }),
            PeriodMode::Warn => {
                let warning = CrossPeriodWarning {
                    start,
                    end,
                    resolved: start_period,
                    end_period,
                };
                warn!(%start, %end, period = %start_period, "date range spans more than one period");
                Ok(PeriodResolution {
                    period: start_period,
                    warning: Some(warning),
                })
            }
        }
    }

    /// Parses a label such as "Januari 2025" or "december 2024".
    pub fn from_label(label: &str) -> Result<Period, PeriodError> {
        let unrecognized = || PeriodError::UnrecognizedLabel(label.to_string());

        let mut parts = label.split_whitespace();
        let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(unrecognized());
        };

        let month = Month::from_name(month).ok_or_else(unrecognized)?;
        let year: i32 = year.parse().map_err(|_| unrecognized())?;
        Period::new(year, month.number())
    }
}
