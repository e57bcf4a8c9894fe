//! TER (Tarif Efektif Rata-rata), the monthly effective rate method.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax::types::TaxStatus;

/// TER category derived from tax status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerCategory {
    /// TK0.
    A,
    /// TK1, TK2, K0.
    B,
    /// TK3, K1-K3, and every HB status.
    C,
}

impl TerCategory {
    /// Statutory TER category for a tax status.
    #[must_use]
    pub fn for_status(status: TaxStatus) -> Self {
        match status {
            TaxStatus::Tk0 => Self::A,
            TaxStatus::Tk1 | TaxStatus::Tk2 | TaxStatus::K0 => Self::B,
            TaxStatus::Tk3
            | TaxStatus::K1
            | TaxStatus::K2
            | TaxStatus::K3
            | TaxStatus::Hb0
            | TaxStatus::Hb1
            | TaxStatus::Hb2
            | TaxStatus::Hb3 => Self::C,
        }
    }

    /// Rate used when no bracket in the table matches, as a fraction.
    #[must_use]
    pub fn default_rate(self) -> Decimal {
        match self {
            Self::A => Decimal::new(5, 2),
            Self::B => Decimal::new(15, 2),
            Self::C => Decimal::new(25, 2),
        }
    }
}

impl fmt::Display for TerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        };
        write!(f, "TER {letter}")
    }
}

/// One monthly income band of the TER table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerBracket {
    /// Category the band belongs to.
    pub category: TerCategory,
    /// Inclusive lower bound.
    pub income_from: Decimal,
    /// Exclusive upper bound; `None` for the top band.
    pub income_to: Option<Decimal>,
    /// Rate as a fraction.
    pub rate: Decimal,
}

impl TerBracket {
    fn contains(&self, income: Decimal) -> bool {
        income >= self.income_from && self.income_to.is_none_or(|to| income < to)
    }
}

/// TER rate table.
///
/// Empty by default, in which case every lookup falls back to the
/// category's default rate. Statuses map onto categories through
/// [`TerCategory::for_status`] unless the table overrides them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerTable {
    brackets: Vec<TerBracket>,
    #[serde(default)]
    categories: BTreeMap<TaxStatus, TerCategory>,
}

impl TerTable {
    /// Creates a table from brackets.
    #[must_use]
    pub fn new(brackets: Vec<TerBracket>) -> Self {
        Self {
            brackets,
            categories: BTreeMap::new(),
        }
    }

    /// Overrides the category for some statuses. Statuses not listed keep
    /// the statutory category.
    #[must_use]
    pub fn with_categories(
        mut self,
        overrides: impl IntoIterator<Item = (TaxStatus, TerCategory)>,
    ) -> Self {
        self.categories.extend(overrides);
        self
    }

    /// Brackets in the table.
    #[must_use]
    pub fn brackets(&self) -> &[TerBracket] {
        &self.brackets
    }

    /// Category this table assigns to `status`.
    #[must_use]
    pub fn category_for(&self, status: TaxStatus) -> TerCategory {
        self.categories
            .get(&status)
            .copied()
            .unwrap_or_else(|| TerCategory::for_status(status))
    }

    /// Rate for a tax status and monthly gross income, as a fraction.
    #[must_use]
    pub fn rate_for_status(&self, status: TaxStatus, income: Decimal) -> Decimal {
        self.rate_for(self.category_for(status), income)
    }

    /// Rate for a category and monthly gross income, as a fraction.
    ///
    /// Non-positive income has no tax. Otherwise the first matching bracket
    /// wins, with the category's default rate as the fallback.
    #[must_use]
    pub fn rate_for(&self, category: TerCategory, income: Decimal) -> Decimal {
        if income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.brackets
            .iter()
            .filter(|b| b.category == category)
            .find(|b| b.contains(income))
            .map_or_else(|| category.default_rate(), |b| b.rate)
    }
}
