//! Property-based tests for tax aggregation.

use payroll_id_shared::types::EmployeeId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::period::{Month, Period};
use crate::tax::aggregate::TaxAggregator;
use crate::tax::calculator::TaxCalculator;
use crate::tax::error::TaxError;
use crate::tax::types::{TaxCorrection, TaxLine, TaxMethod, TaxStatus};

fn arb_status() -> impl Strategy<Value = TaxStatus> {
    prop::sample::select(TaxStatus::ALL.to_vec())
}

/// Whole-rupiah monthly gross in hundreds, so `gross × 5%` stays exact.
fn arb_gross() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|hundreds| Decimal::from(hundreds * 100))
}

fn arb_month() -> impl Strategy<Value = Month> {
    prop::sample::select(Month::ALL.to_vec())
}

fn arb_correction() -> impl Strategy<Value = TaxCorrection> {
    (-10_000_000i64..10_000_000).prop_map(|amount| TaxCorrection {
        employee_id: EmployeeId::new(),
        amount: Decimal::from(amount),
    })
}

/// Lines produced by the calculator, mixing both methods.
fn arb_calculated_line() -> impl Strategy<Value = TaxLine> {
    (arb_gross(), arb_status(), any::<bool>()).prop_map(|(gross, status, use_ter)| {
        let calculator = TaxCalculator::default();
        let employee = EmployeeId::new();
        if use_ter {
            calculator.monthly_ter(employee, gross, status).unwrap()
        } else {
            calculator
                .monthly_progressive(employee, gross, Decimal::ZERO, status)
                .unwrap()
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The total is the sum of computed tax and method counts add up.
    #[test]
    fn prop_total_is_sum_of_lines(lines in prop::collection::vec(arb_calculated_line(), 0..30)) {
        let period = Period::from_parts(2025, Month::March);
        let aggregate = TaxAggregator::aggregate(&lines, period, &[]).unwrap();

        let expected: Decimal = lines.iter().map(|l| l.computed_tax).sum();
        prop_assert_eq!(aggregate.total, expected);
        prop_assert_eq!(aggregate.effective_rate_count + aggregate.progressive_count, lines.len());
    }

    /// TER lines from the calculator never trigger a mismatch warning.
    #[test]
    fn prop_calculated_ter_lines_never_warn(lines in prop::collection::vec(arb_calculated_line(), 0..30)) {
        let period = Period::from_parts(2025, Month::March);
        let aggregate = TaxAggregator::aggregate(&lines, period, &[]).unwrap();
        prop_assert!(aggregate.warnings.is_empty());
    }

    /// Corrections never change `total`; in December they land in `correction`.
    #[test]
    fn prop_december_correction_never_merged(
        lines in prop::collection::vec(arb_calculated_line(), 0..20),
        corrections in prop::collection::vec(arb_correction(), 0..10),
    ) {
        let december = Period::from_parts(2025, Month::December);
        let with = TaxAggregator::aggregate(&lines, december, &corrections).unwrap();
        let without = TaxAggregator::aggregate(&lines, december, &[]).unwrap();

        prop_assert_eq!(with.total, without.total);
        let expected: Decimal = corrections.iter().map(|c| c.amount).sum();
        prop_assert_eq!(with.correction, Some(expected));
        prop_assert_eq!(without.correction, Some(Decimal::ZERO));
    }

    /// Any non-December month rejects corrections and reports no correction otherwise.
    #[test]
    fn prop_corrections_rejected_outside_december(
        month in arb_month(),
        correction in arb_correction(),
    ) {
        prop_assume!(month != Month::December);
        let period = Period::from_parts(2025, month);

        let is_rejected = matches!(
            TaxAggregator::aggregate(&[], period, &[correction]),
            Err(TaxError::CorrectionOutsideDecember { .. })
        );
        prop_assert!(is_rejected);
        prop_assert_eq!(TaxAggregator::aggregate(&[], period, &[]).unwrap().correction, None);
    }

    /// Progressive tax never goes negative and is zero below PTKP.
    #[test]
    fn prop_progressive_tax_non_negative(gross in arb_gross(), status in arb_status()) {
        let line = TaxCalculator::default()
            .monthly_progressive(EmployeeId::new(), gross, Decimal::ZERO, status)
            .unwrap();
        prop_assert!(line.computed_tax >= Decimal::ZERO);
        prop_assert_eq!(line.method, TaxMethod::Progressive);
        if gross * Decimal::from(12) <= Decimal::from(54_000_000) {
            prop_assert_eq!(line.computed_tax, Decimal::ZERO);
        }
    }
}
