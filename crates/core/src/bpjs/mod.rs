//! BPJS social-insurance contributions.
//!
//! - `types` - Contribution categories, lines, and category totals
//! - `calculation` - Per-employee contribution lines from basic salary
//! - `aggregate` - Period totals per category
//! - `error` - BPJS-specific error types

pub mod aggregate;
pub mod calculation;
pub mod error;
pub mod types;

#[cfg(test)]
mod aggregate_props;

pub use aggregate::ContributionAggregator;
pub use calculation::ContributionCalculator;
pub use error::BpjsError;
pub use types::{CategoryTotal, ContributionCategory, ContributionLine, ContributionRates, Participation};
