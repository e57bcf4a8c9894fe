//! Property-based tests for the reconciliation service.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::reconciliation::service::ReconciliationService;
use crate::reconciliation::types::{Direction, Tolerance};

/// Amounts with two decimal places, positive or negative.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A total always reconciles with itself.
    #[test]
    fn prop_reconcile_self_is_balanced(x in arb_amount()) {
        let result = ReconciliationService::reconcile(x, x);
        prop_assert!(result.within_tolerance);
        prop_assert_eq!(result.difference, Decimal::ZERO);
        prop_assert_eq!(result.direction, Direction::Balanced);
    }

    /// Difference is expected minus actual, and swapping sides negates it.
    #[test]
    fn prop_difference_is_antisymmetric(a in arb_amount(), b in arb_amount()) {
        let forward = ReconciliationService::reconcile(a, b);
        let backward = ReconciliationService::reconcile(b, a);
        prop_assert_eq!(forward.difference, b - a);
        prop_assert_eq!(forward.difference, -backward.difference);
        prop_assert_eq!(forward.within_tolerance, backward.within_tolerance);
    }

    /// Within tolerance exactly when the absolute gap is at most the tolerance.
    #[test]
    fn prop_within_tolerance_matches_gap(
        a in arb_amount(),
        b in arb_amount(),
        tolerance_cents in 0i64..100_000,
    ) {
        let tolerance = Tolerance::new(Decimal::new(tolerance_cents, 2));
        let result = ReconciliationService::reconcile_with(a, b, tolerance);
        prop_assert_eq!(result.within_tolerance, (b - a).abs() <= tolerance.value());
    }

    /// Reconciliation is pure: repeated calls agree.
    #[test]
    fn prop_reconcile_is_repeatable(a in arb_amount(), b in arb_amount()) {
        prop_assert_eq!(
            ReconciliationService::reconcile(a, b),
            ReconciliationService::reconcile(a, b)
        );
    }
}
