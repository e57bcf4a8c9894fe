//! Property-based tests for the settlement gate.

use std::cell::Cell;

use payroll_id_shared::types::{CompanyId, EmployeeId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::bpjs::{ContributionCategory, ContributionLine};
use crate::period::{Month, Period};
use crate::settlement::error::SettlementError;
use crate::settlement::payment::{PaymentError, PaymentService};
use crate::settlement::service::SettlementGate;
use crate::settlement::types::{
    AccountMapping, AggregationDocument, DocumentStatus, PaymentReference, PaymentRequest,
};

struct CountingPayments {
    calls: Cell<usize>,
}

impl PaymentService for CountingPayments {
    fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentReference, PaymentError> {
        self.calls.set(self.calls.get() + 1);
        Ok(PaymentReference::new(format!("PE-{}", request.document_id)))
    }
}

fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::Open),
        Just(DocumentStatus::Finalized),
        Just(DocumentStatus::Settled),
    ]
}

fn arb_category() -> impl Strategy<Value = ContributionCategory> {
    prop::sample::select(ContributionCategory::ALL.to_vec())
}

fn arb_line() -> impl Strategy<Value = ContributionLine> {
    (arb_category(), 0i64..10_000_000, 0i64..10_000_000).prop_map(|(category, ee, er)| {
        ContributionLine::new(
            EmployeeId::new(),
            category,
            Decimal::from(ee),
            Decimal::from(er),
        )
    })
}

fn mapping_for(categories: &[ContributionCategory]) -> AccountMapping {
    categories
        .iter()
        .fold(AccountMapping::default(), |mapping, category| {
            mapping.with_category(*category, format!("21-{}", category.as_str()))
        })
}

fn finalized(lines: Vec<ContributionLine>) -> Option<AggregationDocument> {
    let doc = AggregationDocument::new(CompanyId::new(), Period::from_parts(2025, Month::July));
    let doc = SettlementGate::populate(&doc, lines, Vec::new(), Vec::new()).ok()?;
    let payments = CountingPayments { calls: Cell::new(0) };
    SettlementGate::transition(&doc, DocumentStatus::Finalized, &AccountMapping::default(), &payments).ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A rejected transition never changes the caller's document.
    #[test]
    fn prop_rejected_transition_leaves_state(
        lines in prop::collection::vec(arb_line(), 0..10),
        target in arb_status(),
    ) {
        let doc = AggregationDocument::new(CompanyId::new(), Period::from_parts(2025, Month::July));
        let doc = SettlementGate::populate(&doc, lines, Vec::new(), Vec::new()).unwrap();
        let before = doc.clone();
        let payments = CountingPayments { calls: Cell::new(0) };

        let result = SettlementGate::transition(&doc, target, &AccountMapping::default(), &payments);
        prop_assert_eq!(&doc, &before);
        if let Ok(next) = result {
            prop_assert_eq!(next.version, doc.version + 1);
        }
    }

    /// Settle succeeds exactly when every positive category is mapped.
    #[test]
    fn prop_settle_requires_mapping_for_positive_categories(
        lines in prop::collection::vec(arb_line(), 1..10),
        mapped in prop::collection::vec(arb_category(), 0..5),
    ) {
        let Some(doc) = finalized(lines) else {
            return Ok(());
        };
        let payments = CountingPayments { calls: Cell::new(0) };
        let mapping = mapping_for(&mapped);

        let unmapped: Vec<String> = doc
            .category_totals
            .iter()
            .filter(|t| !mapped.contains(&t.category))
            .map(|t| t.category.component_name().to_string())
            .collect();

        let result = SettlementGate::transition(&doc, DocumentStatus::Settled, &mapping, &payments);
        if unmapped.is_empty() {
            prop_assert!(result.is_ok());
            prop_assert_eq!(payments.calls.get(), 1);
        } else {
            prop_assert_eq!(result, Err(SettlementError::IncompleteMapping { missing: unmapped }));
            prop_assert_eq!(payments.calls.get(), 0);
        }
    }

    /// Repeated settle calls create exactly one payment.
    #[test]
    fn prop_settle_is_idempotent(
        lines in prop::collection::vec(arb_line(), 1..10),
        repeats in 1usize..5,
    ) {
        let Some(doc) = finalized(lines) else {
            return Ok(());
        };
        let payments = CountingPayments { calls: Cell::new(0) };
        let mapping = mapping_for(&ContributionCategory::ALL);

        let settled = SettlementGate::transition(&doc, DocumentStatus::Settled, &mapping, &payments).unwrap();
        for _ in 0..repeats {
            let again = SettlementGate::transition(&settled, DocumentStatus::Settled, &mapping, &payments).unwrap();
            prop_assert_eq!(&again, &settled);
        }
        prop_assert_eq!(payments.calls.get(), 1);
    }
}
