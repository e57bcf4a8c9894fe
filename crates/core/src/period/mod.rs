//! Period key resolution.
//!
//! A payroll period is one calendar month. Documents are grouped by
//! `(company, period)`; the resolver turns dates, explicit year/month pairs,
//! or date ranges into that canonical key.

pub mod error;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod resolver_props;

pub use error::PeriodError;
pub use resolver::PeriodResolver;
pub use types::{
    CrossPeriodWarning, Locale, Month, Period, PeriodInput, PeriodKey, PeriodMode,
    PeriodResolution,
};
