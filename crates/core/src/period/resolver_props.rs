//! Property-based tests for the period resolver.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;

use crate::period::error::PeriodError;
use crate::period::resolver::PeriodResolver;
use crate::period::types::{Locale, Month, Period, PeriodMode};

/// Strategy for dates between 2000 and 2099.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_month() -> impl Strategy<Value = Month> {
    (1u32..=12).prop_map(|n| Month::from_number(n).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A range inside one month resolves to that month in either mode.
    #[test]
    fn prop_same_month_range_never_warns(start in arb_date(), extra in 0i64..3) {
        let end = start + Duration::days(extra);
        prop_assume!(end.month() == start.month());

        for mode in [PeriodMode::Strict, PeriodMode::Warn] {
            let resolution = PeriodResolver::resolve_range(start, end, mode).unwrap();
            prop_assert_eq!(resolution.period, Period::of_date(start));
            prop_assert!(resolution.warning.is_none());
        }
    }

    /// Crossing a month boundary fails strict and warns in warn mode,
    /// always resolving to the start date's period.
    #[test]
    fn prop_cross_month_range(start in arb_date(), extra in 31i64..400) {
        let end = start + Duration::days(extra);

        let strict = PeriodResolver::resolve_range(start, end, PeriodMode::Strict);
        let is_cross_period = matches!(strict, Err(PeriodError::CrossPeriod { .. }));
        prop_assert!(is_cross_period);

        let warned = PeriodResolver::resolve_range(start, end, PeriodMode::Warn).unwrap();
        prop_assert_eq!(warned.period, Period::of_date(start));
        prop_assert!(warned.warning.is_some());
    }

    /// Labels parse back to the same period in both locales.
    #[test]
    fn prop_label_parses_back(year in 1900i32..2200, month in arb_month()) {
        let period = Period::from_parts(year, month);
        for locale in [Locale::English, Locale::Indonesian] {
            let parsed = PeriodResolver::from_label(&period.label(locale)).unwrap();
            prop_assert_eq!(parsed, period);
        }
    }

    /// Every date falls between its period's first and last day.
    #[test]
    fn prop_period_bounds_contain_date(date in arb_date()) {
        let period = Period::of_date(date);
        prop_assert!(period.start_date().unwrap() <= date);
        prop_assert!(period.end_date().unwrap() >= date);
        prop_assert!(period.contains(date));
    }
}
