//! PTKP, the annual non-taxable income allowance.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax::types::TaxStatus;

/// Annual PTKP amount per tax status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtkpTable {
    amounts: BTreeMap<TaxStatus, Decimal>,
}

impl PtkpTable {
    /// Builds a table from explicit amounts, filling gaps with the defaults.
    #[must_use]
    pub fn with_amounts(overrides: impl IntoIterator<Item = (TaxStatus, Decimal)>) -> Self {
        let mut table = Self::default();
        table.amounts.extend(overrides);
        table
    }

    /// Annual PTKP for `status`.
    #[must_use]
    pub fn amount(&self, status: TaxStatus) -> Decimal {
        self.amounts
            .get(&status)
            .copied()
            .unwrap_or_else(|| default_amount(status))
    }

    /// Monthly PTKP for `status`.
    #[must_use]
    pub fn monthly_amount(&self, status: TaxStatus) -> Decimal {
        self.amount(status) / Decimal::from(12)
    }
}

impl Default for PtkpTable {
    fn default() -> Self {
        Self {
            amounts: TaxStatus::ALL
                .into_iter()
                .map(|status| (status, default_amount(status)))
                .collect(),
        }
    }
}

fn default_amount(status: TaxStatus) -> Decimal {
    let amount: i64 = match status {
        TaxStatus::Tk0 => 54_000_000,
        TaxStatus::Tk1 | TaxStatus::K0 => 58_500_000,
        TaxStatus::Tk2 | TaxStatus::K1 => 63_000_000,
        TaxStatus::Tk3 | TaxStatus::K2 => 67_500_000,
        TaxStatus::K3 => 72_000_000,
        TaxStatus::Hb0 => 112_500_000,
        TaxStatus::Hb1 => 117_000_000,
        TaxStatus::Hb2 => 121_500_000,
        TaxStatus::Hb3 => 126_000_000,
    };
    Decimal::from(amount)
}
