//! PPh 21 domain types.

use std::fmt;
use std::str::FromStr;

use payroll_id_shared::types::EmployeeId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::tax::error::TaxError;

/// Marital and dependant status used for PTKP and TER categorization.
///
/// `TK` is single, `K` married, `HB` a married woman filing separately.
/// The digit is the number of dependants (0-3).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum TaxStatus {
    /// Single, no dependants.
    #[default]
    Tk0,
    /// Single, one dependant.
    Tk1,
    /// Single, two dependants.
    Tk2,
    /// Single, three dependants.
    Tk3,
    /// Married, no dependants.
    K0,
    /// Married, one dependant.
    K1,
    /// Married, two dependants.
    K2,
    /// Married, three dependants.
    K3,
    /// Separate filing, no dependants.
    Hb0,
    /// Separate filing, one dependant.
    Hb1,
    /// Separate filing, two dependants.
    Hb2,
    /// Separate filing, three dependants.
    Hb3,
}

impl TaxStatus {
    /// All statuses.
    pub const ALL: [Self; 12] = [
        Self::Tk0,
        Self::Tk1,
        Self::Tk2,
        Self::Tk3,
        Self::K0,
        Self::K1,
        Self::K2,
        Self::K3,
        Self::Hb0,
        Self::Hb1,
        Self::Hb2,
        Self::Hb3,
    ];

    /// Status code, e.g. "TK0" or "HB2".
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Tk0 => "TK0",
            Self::Tk1 => "TK1",
            Self::Tk2 => "TK2",
            Self::Tk3 => "TK3",
            Self::K0 => "K0",
            Self::K1 => "K1",
            Self::K2 => "K2",
            Self::K3 => "K3",
            Self::Hb0 => "HB0",
            Self::Hb1 => "HB1",
            Self::Hb2 => "HB2",
            Self::Hb3 => "HB3",
        }
    }
}

impl fmt::Display for TaxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TaxStatus {
    type Err = TaxError;

    /// Accepts "TK0", "tk/0", "K 1" and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '/' | ' ' | '-'))
            .collect::<String>()
            .to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.code() == normalized)
            .ok_or_else(|| TaxError::UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for TaxStatus {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaxStatus> for String {
    fn from(status: TaxStatus) -> Self {
        status.code().to_string()
    }
}

/// How a line's tax was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMethod {
    /// Monthly effective rate (TER) applied to gross income.
    EffectiveRate,
    /// Annualized progressive brackets, divided back to a month.
    Progressive,
}

/// One employee's PPh 21 line for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Gross income for the month.
    pub gross_income: Decimal,
    /// Deductions allowed before tax (BPJS employee share, biaya jabatan).
    #[serde(default)]
    pub allowable_deduction: Decimal,
    /// Income the tax was computed on.
    #[serde(default)]
    pub taxable_income: Decimal,
    /// Tax actually computed for the month.
    pub computed_tax: Decimal,
    /// Calculation method.
    pub method: TaxMethod,
    /// Effective rate as a fraction (0.05 = 5%); required for `EffectiveRate`.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

/// December true-up for one employee.
///
/// Positive when the employee was underpaid over the year, negative when
/// overpaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCorrection {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Signed correction amount.
    pub amount: Decimal,
}

/// Non-blocking notice that a line's tax disagrees with its stated rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxMismatchWarning {
    /// Employee.
    pub employee_id: EmployeeId,
    /// `gross_income × rate`.
    pub expected: Decimal,
    /// Tax on the line.
    pub actual: Decimal,
    /// `expected − actual`.
    pub difference: Decimal,
}

impl fmt::Display for TaxMismatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tax for employee {} is {} but rate implies {} (difference {})",
            self.employee_id, self.actual, self.expected, self.difference
        )
    }
}

/// Period tax totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAggregate {
    /// Sum of `computed_tax`.
    pub total: Decimal,
    /// Sum of `gross_income`.
    pub total_gross: Decimal,
    /// Sum of `taxable_income`.
    pub total_taxable: Decimal,
    /// Lines computed with TER.
    pub effective_rate_count: usize,
    /// Lines computed with progressive brackets.
    pub progressive_count: usize,
    /// December correction total, kept apart from `total`. `None` outside December.
    pub correction: Option<Decimal>,
    /// Rate mismatches found while aggregating.
    #[serde(default)]
    pub warnings: Vec<TaxMismatchWarning>,
}

impl TaxAggregate {
    /// Total withholding owed for the period, including any December correction.
    #[must_use]
    pub fn payable(&self) -> Decimal {
        self.total + self.correction.unwrap_or_default()
    }
}

/// Year-to-date figures used for the December true-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearToDate {
    /// Gross income before December.
    #[serde(default)]
    pub gross: Decimal,
    /// BPJS employee contributions before December.
    #[serde(default)]
    pub bpjs: Decimal,
    /// Tax already withheld for the year.
    #[serde(default)]
    pub tax: Decimal,
}

/// Rounds a tax amount to whole rupiah.
#[must_use]
pub fn round_rupiah(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
