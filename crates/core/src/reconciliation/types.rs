//! Reconciliation types.

use std::fmt;

use payroll_id_shared::config::ReconciliationConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bpjs::CategoryTotal;

/// Default absolute tolerance when comparing two totals (0.1).
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Absolute tolerance for total comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(Decimal);

impl Tolerance {
    /// Creates a tolerance; the sign is ignored.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(value.abs())
    }

    /// The tolerance value.
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Returns true if `difference` is within tolerance, inclusive.
    #[must_use]
    pub fn admits(self, difference: Decimal) -> bool {
        difference.abs() <= self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(TOLERANCE)
    }
}

impl From<&ReconciliationConfig> for Tolerance {
    fn from(config: &ReconciliationConfig) -> Self {
        Self::new(config.tolerance)
    }
}

/// Total posted to one GL account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTotal {
    /// Account identifier.
    pub account: String,
    /// Amount.
    pub amount: Decimal,
}

/// Which side of a comparison is larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Both sides are exactly equal.
    Balanced,
    /// The expected (account) total is larger.
    ExpectedExceeds,
    /// The actual (component) total is larger.
    ActualExceeds,
}

/// Outcome of comparing an actual total with an expected total.
///
/// The actual side is what the component lines add up to; the expected side
/// is the total entered against GL accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Account total the components should match.
    pub expected_total: Decimal,
    /// Total of the component lines.
    pub actual_total: Decimal,
    /// `expected_total − actual_total`.
    pub difference: Decimal,
    /// `|difference| <= tolerance`.
    pub within_tolerance: bool,
    /// Which side is larger.
    pub direction: Direction,
}

impl ReconciliationResult {
    /// Human-readable summary of the comparison.
    #[must_use]
    pub fn message(&self) -> String {
        let gap = self.difference.abs();
        match self.direction {
            Direction::Balanced => "account total matches component total".to_string(),
            Direction::ExpectedExceeds => {
                format!("account total exceeds component total by {gap}")
            }
            Direction::ActualExceeds => {
                format!("component total exceeds account total by {gap}")
            }
        }
    }
}

impl fmt::Display for ReconciliationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Anything that can be reduced to a single total for reconciliation.
pub trait TotalSource {
    /// Sum of all amounts.
    fn total(&self) -> Decimal;
}

impl TotalSource for Decimal {
    fn total(&self) -> Decimal {
        *self
    }
}

impl TotalSource for [CategoryTotal] {
    fn total(&self) -> Decimal {
        self.iter().map(|t| t.amount).sum()
    }
}

impl TotalSource for [AccountTotal] {
    fn total(&self) -> Decimal {
        self.iter().map(|t| t.amount).sum()
    }
}

impl<T: TotalSource + ?Sized> TotalSource for &T {
    fn total(&self) -> Decimal {
        (**self).total()
    }
}

impl<T> TotalSource for Vec<T>
where
    [T]: TotalSource,
{
    fn total(&self) -> Decimal {
        self.as_slice().total()
    }
}
