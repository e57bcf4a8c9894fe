//! Period aggregation of PPh 21 lines.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::period::Period;
use crate::reconciliation::Tolerance;
use crate::tax::error::TaxError;
use crate::tax::types::{TaxAggregate, TaxCorrection, TaxLine, TaxMethod, TaxMismatchWarning};

/// Stateless tax line aggregator.
pub struct TaxAggregator;

impl TaxAggregator {
    /// Aggregates tax lines using the default tolerance.
    ///
    /// # Errors
    ///
    /// See [`TaxAggregator::aggregate_with`].
    pub fn aggregate(
        lines: &[TaxLine],
        period: Period,
        corrections: &[TaxCorrection],
    ) -> Result<TaxAggregate, TaxError> {
        Self::aggregate_with(lines, period, corrections, Tolerance::default())
    }

    /// Sums tax lines for one period.
    ///
    /// Effective-rate lines are checked against `gross × rate`; a difference
    /// beyond `tolerance` is reported as a warning and does not stop
    /// aggregation. In December the corrections are summed into
    /// `correction`, separately from `total`.
    ///
    /// # Errors
    ///
    /// - `TaxError::MissingRate` if an effective-rate line has no rate
    /// - `TaxError::NegativeAmount` if a line's gross income or computed tax
    ///   is negative
    /// - `TaxError::CorrectionOutsideDecember` if corrections are given for
    ///   any other month
    pub fn aggregate_with(
        lines: &[TaxLine],
        period: Period,
        corrections: &[TaxCorrection],
        tolerance: Tolerance,
    ) -> Result<TaxAggregate, TaxError> {
        if !period.is_december() && !corrections.is_empty() {
            return Err(TaxError::CorrectionOutsideDecember { period });
        }

        let mut aggregate = TaxAggregate::default();

        for line in lines {
            if line.gross_income < Decimal::ZERO {
                return Err(TaxError::NegativeAmount {
                    employee_id: line.employee_id,
                    field: "gross income",
                    amount: line.gross_income,
                });
            }
            if line.computed_tax < Decimal::ZERO {
                return Err(TaxError::NegativeAmount {
                    employee_id: line.employee_id,
                    field: "computed tax",
                    amount: line.computed_tax,
                });
            }

            match line.method {
                TaxMethod::EffectiveRate => {
                    let rate = line.rate.ok_or(TaxError::MissingRate {
                        employee_id: line.employee_id,
                    })?;
                    if let Some(warning) = Self::check_rate(line, rate, tolerance) {
                        warn!(
                            employee_id = %warning.employee_id,
                            expected = %warning.expected,
                            actual = %warning.actual,
                            "tax does not match effective rate"
                        );
                        aggregate.warnings.push(warning);
                    }
                    aggregate.effective_rate_count += 1;
                }
                TaxMethod::Progressive => aggregate.progressive_count += 1,
            }

            aggregate.total += line.computed_tax;
            aggregate.total_gross += line.gross_income;
            aggregate.total_taxable += line.taxable_income;
        }

        if period.is_december() {
            aggregate.correction = Some(corrections.iter().map(|c| c.amount).sum());
        }

        debug!(
            %period,
            lines = lines.len(),
            total = %aggregate.total,
            warnings = aggregate.warnings.len(),
            "aggregated tax lines"
        );

        Ok(aggregate)
    }

    fn check_rate(line: &TaxLine, rate: Decimal, tolerance: Tolerance) -> Option<TaxMismatchWarning> {
        let expected = line.gross_income * rate;
        let difference = expected - line.computed_tax;
        if tolerance.admits(difference) {
            return None;
        }
        Some(TaxMismatchWarning {
            employee_id: line.employee_id,
            expected,
            actual: line.computed_tax,
            difference,
        })
    }
}
