//! Reconciliation service.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::reconciliation::types::{Direction, ReconciliationResult, Tolerance, TotalSource};

/// Stateless reconciliation service.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Compares component totals (`actual`) against account totals
    /// (`expected`) with the default tolerance.
    #[must_use]
    pub fn reconcile(actual: impl TotalSource, expected: impl TotalSource) -> ReconciliationResult {
        Self::reconcile_with(actual, expected, Tolerance::default())
    }

    /// Compares component totals (`actual`) against account totals (`expected`).
    ///
    /// `difference` is `expected − actual`, positive when the accounts hold more. Pure; calling it again with the
    /// same inputs gives the same result.
    #[must_use]
    pub fn reconcile_with(
        actual: impl TotalSource,
        expected: impl TotalSource,
        tolerance: Tolerance,
    ) -> ReconciliationResult {
        let actual_total = actual.total();
        let expected_total = expected.total();
        let difference = expected_total - actual_total;

        let direction = match difference.cmp(&Decimal::ZERO) {
            Ordering::Equal => Direction::Balanced,
            Ordering::Greater => Direction::ExpectedExceeds,
            Ordering::Less => Direction::ActualExceeds,
        };

        ReconciliationResult {
            expected_total,
            actual_total,
            difference,
            within_tolerance: tolerance.admits(difference),
            direction,
        }
    }
}
