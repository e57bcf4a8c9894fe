//! Property-based tests for contribution aggregation.

use payroll_id_shared::types::EmployeeId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::bpjs::aggregate::ContributionAggregator;
use crate::bpjs::types::{ContributionCategory, ContributionLine};

fn arb_category() -> impl Strategy<Value = ContributionCategory> {
    prop_oneof![
        Just(ContributionCategory::Health),
        Just(ContributionCategory::OldAgeSavings),
        Just(ContributionCategory::Pension),
        Just(ContributionCategory::WorkAccident),
        Just(ContributionCategory::DeathBenefit),
    ]
}

/// Non-negative amounts with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_line() -> impl Strategy<Value = ContributionLine> {
    (any::<u128>(), arb_category(), arb_amount(), arb_amount()).prop_map(
        |(id, category, employee, employer)| {
            ContributionLine::new(
                EmployeeId::from_uuid(Uuid::from_u128(id)),
                category,
                employee,
                employer,
            )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Aggregating the same lines twice gives the same totals.
    #[test]
    fn prop_aggregate_is_idempotent(lines in prop::collection::vec(arb_line(), 0..40)) {
        let first = ContributionAggregator::aggregate(&lines).unwrap();
        let second = ContributionAggregator::aggregate(&lines).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every emitted total is positive and categories are unique and ordered.
    #[test]
    fn prop_totals_positive_and_ordered(lines in prop::collection::vec(arb_line(), 0..40)) {
        let totals = ContributionAggregator::aggregate(&lines).unwrap();
        for total in &totals {
            prop_assert!(total.amount > Decimal::ZERO);
        }
        for pair in totals.windows(2) {
            prop_assert!(pair[0].category < pair[1].category);
        }
    }

    /// The grand total equals the sum of payable amounts over all lines.
    #[test]
    fn prop_grand_total_matches_lines(lines in prop::collection::vec(arb_line(), 0..40)) {
        let totals = ContributionAggregator::aggregate(&lines).unwrap();
        let expected: Decimal = lines.iter().map(ContributionLine::payable_amount).sum();
        prop_assert_eq!(ContributionAggregator::grand_total(&totals), expected);
    }

    /// A category whose lines are all zero never appears in the output.
    #[test]
    fn prop_zero_only_category_omitted(
        category in arb_category(),
        zero_count in 1usize..5,
        others in prop::collection::vec(arb_line(), 0..20),
    ) {
        let mut lines: Vec<_> = others.into_iter().filter(|l| l.category != category).collect();
        for _ in 0..zero_count {
            lines.push(ContributionLine::new(
                EmployeeId::new(),
                category,
                Decimal::ZERO,
                Decimal::ZERO,
            ));
        }
        let totals = ContributionAggregator::aggregate(&lines).unwrap();
        prop_assert!(totals.iter().all(|t| t.category != category));
    }

    /// Employer-only categories total exactly the employer side.
    #[test]
    fn prop_employer_only_uses_employer_side(
        employee in arb_amount(),
        employer in arb_amount(),
    ) {
        prop_assume!(employer > Decimal::ZERO);
        let lines = vec![ContributionLine::new(
            EmployeeId::new(),
            ContributionCategory::WorkAccident,
            employee,
            employer,
        )];
        let totals = ContributionAggregator::aggregate(&lines).unwrap();
        prop_assert_eq!(totals.len(), 1);
        prop_assert_eq!(totals[0].amount, employer);
    }
}
