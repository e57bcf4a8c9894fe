//! PPh 21 income tax.
//!
//! - `types` - Tax lines, statuses, corrections, and period aggregates
//! - `ptkp` - Non-taxable income allowance per status
//! - `ter` - Monthly effective rate categories and tables
//! - `progressive` - Annual progressive brackets
//! - `calculator` - Per-employee monthly and year-end calculation
//! - `aggregate` - Period totals with rate checks and December corrections
//! - `error` - Tax-specific error types

pub mod aggregate;
pub mod calculator;
pub mod error;
pub mod progressive;
pub mod ptkp;
pub mod ter;
pub mod types;

#[cfg(test)]
mod aggregate_props;

pub use aggregate::TaxAggregator;
pub use calculator::{AnnualTaxComputation, BiayaJabatan, TaxCalculator};
pub use error::TaxError;
pub use progressive::{BracketTax, ProgressiveBrackets, TaxBracket};
pub use ptkp::PtkpTable;
pub use ter::{TerBracket, TerCategory, TerTable};
pub use types::{
    TaxAggregate, TaxCorrection, TaxLine, TaxMethod, TaxMismatchWarning, TaxStatus, YearToDate,
    round_rupiah,
};
