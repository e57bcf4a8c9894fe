//! Annual progressive brackets (Pasal 17).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of annual taxable income.
    pub lower: Decimal,
    /// Upper bound; `None` for the top bracket.
    pub upper: Option<Decimal>,
    /// Rate as a fraction.
    pub rate: Decimal,
}

/// Tax owed within one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    /// The bracket.
    pub bracket: TaxBracket,
    /// Part of the income that falls inside the bracket.
    pub taxable: Decimal,
    /// `taxable × rate`.
    pub tax: Decimal,
}

/// Ordered progressive bracket schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveBrackets {
    brackets: Vec<TaxBracket>,
}

impl ProgressiveBrackets {
    /// Creates a schedule, sorting brackets by lower bound.
    #[must_use]
    pub fn new(mut brackets: Vec<TaxBracket>) -> Self {
        brackets.sort_by(|a, b| a.lower.cmp(&b.lower));
        Self { brackets }
    }

    /// Brackets in ascending order.
    #[must_use]
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Computes annual tax on `pkp`, with the per-bracket breakdown.
    ///
    /// Brackets the income does not reach are left out of the breakdown.
    /// The total is not rounded.
    #[must_use]
    pub fn compute(&self, pkp: Decimal) -> (Decimal, Vec<BracketTax>) {
        let mut total = Decimal::ZERO;
        let mut details = Vec::new();

        for bracket in &self.brackets {
            if pkp <= bracket.lower {
                break;
            }
            let ceiling = bracket.upper.map_or(pkp, |upper| pkp.min(upper));
            let taxable = ceiling - bracket.lower;
            let tax = taxable * bracket.rate;
            total += tax;
            details.push(BracketTax {
                bracket: *bracket,
                taxable,
                tax,
            });
        }

        (total, details)
    }
}

impl Default for ProgressiveBrackets {
    fn default() -> Self {
        let million = |n: i64| Decimal::from(n * 1_000_000);
        Self::new(vec![
            TaxBracket {
                lower: Decimal::ZERO,
                upper: Some(million(60)),
                rate: Decimal::new(5, 2),
            },
            TaxBracket {
                lower: million(60),
                upper: Some(million(250)),
                rate: Decimal::new(15, 2),
            },
            TaxBracket {
                lower: million(250),
                upper: Some(million(500)),
                rate: Decimal::new(25, 2),
            },
            TaxBracket {
                lower: million(500),
                upper: Some(million(5_000)),
                rate: Decimal::new(30, 2),
            },
            TaxBracket {
                lower: million(5_000),
                upper: None,
                rate: Decimal::new(35, 2),
            },
        ])
    }
}
