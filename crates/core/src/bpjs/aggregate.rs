//! Period totals per contribution category.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::bpjs::error::BpjsError;
use crate::bpjs::types::{CategoryTotal, ContributionCategory, ContributionLine};

/// Stateless contribution aggregator.
pub struct ContributionAggregator;

impl ContributionAggregator {
    /// Sums contribution lines into one total per category.
    ///
    /// Health, JHT, and JP add employee and employer amounts; JKK and JKM add
    /// only the employer amount. Categories whose total is not positive are
    /// left out. The result is ordered by category and always freshly built,
    /// so running it twice over the same lines yields the same set.
    ///
    /// # Errors
    ///
    /// Returns `BpjsError::NegativeAmount` for the first line with a negative
    /// employee or employer amount.
    pub fn aggregate(lines: &[ContributionLine]) -> Result<Vec<CategoryTotal>, BpjsError> {
        let mut sums: BTreeMap<ContributionCategory, Decimal> = BTreeMap::new();

        for line in lines {
            if line.employee_amount.is_sign_negative() && !line.employee_amount.is_zero()
                || line.employer_amount.is_sign_negative() && !line.employer_amount.is_zero()
            {
                return Err(BpjsError::NegativeAmount {
                    employee_id: line.employee_id,
                    category: line.category,
                });
            }
            *sums.entry(line.category).or_default() += line.payable_amount();
        }

        let totals: Vec<CategoryTotal> = sums
            .into_iter()
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect();

        debug!(
            lines = lines.len(),
            categories = totals.len(),
            "aggregated contribution lines"
        );

        Ok(totals)
    }

    /// Sum of all category totals.
    #[must_use]
    pub fn grand_total(totals: &[CategoryTotal]) -> Decimal {
        totals.iter().map(|t| t.amount).sum()
    }
}
