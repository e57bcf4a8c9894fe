//! Integration tests for closing a payroll period end to end.
//!
//! Resolves a period, builds contribution and tax lines for a small
//! workforce, reconciles entered account totals, then finalizes and settles
//! through a counting payment service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use payroll_id_core::bpjs::{ContributionCalculator, ContributionCategory, ContributionRates, Participation};
use payroll_id_core::period::{PeriodError, PeriodInput, PeriodMode, PeriodResolver};
use payroll_id_core::reconciliation::{AccountTotal, ReconciliationService};
use payroll_id_core::settlement::{
    AccountMapping, AggregationDocument, DocumentStatus, PaymentError, PaymentReference,
    PaymentRequest, PaymentService, SettlementError, SettlementGate,
};
use payroll_id_core::tax::{TaxCalculator, TaxStatus, YearToDate};
use payroll_id_shared::types::{CompanyId, EmployeeId};

/// Payment service that records every request it receives.
#[derive(Default)]
struct RecordingPayments {
    calls: AtomicUsize,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl PaymentService for RecordingPayments {
    fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentReference, PaymentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests
            .lock()
            .map_err(|_| PaymentError::Unavailable("poisoned".to_string()))?
            .push(request.clone());
        Ok(PaymentReference::new(format!("PE-{n:05}")))
    }
}

struct Employee {
    id: EmployeeId,
    salary: Decimal,
    status: TaxStatus,
    participation: Participation,
}

fn workforce() -> Vec<Employee> {
    vec![
        Employee {
            id: EmployeeId::new(),
            salary: dec!(5000000),
            status: TaxStatus::Tk0,
            participation: Participation::default(),
        },
        Employee {
            id: EmployeeId::new(),
            salary: dec!(20000000),
            status: TaxStatus::K1,
            participation: Participation::default(),
        },
        Employee {
            id: EmployeeId::new(),
            salary: dec!(8000000),
            status: TaxStatus::Tk1,
            participation: Participation {
                kesehatan: true,
                ketenagakerjaan: false,
            },
        },
    ]
}

fn mapping() -> AccountMapping {
    AccountMapping::default()
        .with_category(ContributionCategory::Health, "2141 - BPJS Kesehatan Payable")
        .with_category(ContributionCategory::OldAgeSavings, "2142 - BPJS JHT Payable")
        .with_category(ContributionCategory::Pension, "2143 - BPJS JP Payable")
        .with_category(ContributionCategory::WorkAccident, "2144 - BPJS JKK Payable")
        .with_category(ContributionCategory::DeathBenefit, "2145 - BPJS JKM Payable")
        .with_withholding_tax("2150 - PPh 21 Payable")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Test: Regular month closes and settles once
// ============================================================================
#[test]
fn test_regular_month_close() {
    let period = PeriodResolver::resolve(
        PeriodInput::Range {
            start: date(2025, 3, 1),
            end: date(2025, 3, 31),
        },
        PeriodMode::Strict,
    )
    .unwrap()
    .period;

    let rates = ContributionRates::default();
    let calculator = TaxCalculator::default();
    let mut contribution_lines = Vec::new();
    let mut tax_lines = Vec::new();
    for employee in workforce() {
        contribution_lines.extend(
            ContributionCalculator::calculate(
                employee.id,
                employee.salary,
                employee.participation,
                &rates,
            )
            .unwrap(),
        );
        tax_lines.push(
            calculator
                .monthly_ter(employee.id, employee.salary, employee.status)
                .unwrap(),
        );
    }

    let doc = AggregationDocument::new(CompanyId::new(), period);
    let doc = SettlementGate::populate(&doc, contribution_lines, tax_lines, Vec::new()).unwrap();

    // Health: (50,000 + 200,000) + (120,000 + 480,000) + (80,000 + 320,000)
    let health = doc
        .category_totals
        .iter()
        .find(|t| t.category == ContributionCategory::Health)
        .unwrap();
    assert_eq!(health.amount, dec!(1250000));
    assert_eq!(doc.category_totals.len(), 5);
    assert_eq!(doc.tax.correction, None);
    assert_eq!(doc.tax.effective_rate_count, 3);
    assert!(doc.tax.warnings.is_empty());

    // Accounts are entered as posted, one per category.
    let account_totals: Vec<AccountTotal> = doc
        .category_totals
        .iter()
        .map(|t| AccountTotal {
            account: format!("21-{}", t.category.as_str()),
            amount: t.amount,
        })
        .collect();
    let check = ReconciliationService::reconcile(&doc.category_totals, &account_totals);
    assert!(check.within_tolerance);

    let doc = SettlementGate::enter_account_totals(&doc, account_totals).unwrap();
    let payments = RecordingPayments::default();

    let finalized =
        SettlementGate::transition(&doc, DocumentStatus::Finalized, &mapping(), &payments)
            .unwrap();
    SettlementGate::expect_version(&finalized, doc.version + 1).unwrap();

    let settled =
        SettlementGate::transition(&finalized, DocumentStatus::Settled, &mapping(), &payments)
            .unwrap();
    assert_eq!(settled.status, DocumentStatus::Settled);
    assert_eq!(settled.payment_reference, Some(PaymentReference::new("PE-00001")));

    // A retry after a lost response must not pay twice.
    let retried =
        SettlementGate::transition(&settled, DocumentStatus::Settled, &mapping(), &payments)
            .unwrap();
    assert_eq!(retried.payment_reference, settled.payment_reference);
    assert_eq!(payments.calls.load(Ordering::SeqCst), 1);

    let requests = payments.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].components.len(), 6);
    assert_eq!(requests[0].total(), settled.payable_total());
}

// ============================================================================
// Test: December carries corrections separately into settlement
// ============================================================================
#[test]
fn test_december_close_with_corrections() {
    let period = PeriodResolver::resolve(
        PeriodInput::YearMonth {
            year: 2025,
            month: 12,
        },
        PeriodMode::Strict,
    )
    .unwrap()
    .period;

    let calculator = TaxCalculator::default();
    let rates = ContributionRates::default();
    let employee = EmployeeId::new();
    let salary = dec!(10000000);

    let contributions =
        ContributionCalculator::calculate(employee, salary, Participation::default(), &rates)
            .unwrap();
    let bpjs = ContributionCalculator::employee_total(&contributions);
    let december_line = calculator.monthly_ter(employee, salary, TaxStatus::Tk0).unwrap();

    let ytd = YearToDate {
        gross: salary * Decimal::from(11),
        bpjs: bpjs * Decimal::from(11),
        tax: dec!(2000000),
    };
    let annual = calculator
        .annual_correction(employee, ytd, salary, bpjs, TaxStatus::Tk0)
        .unwrap();

    let doc = AggregationDocument::new(CompanyId::new(), period);
    let doc = SettlementGate::populate(
        &doc,
        contributions,
        vec![december_line.clone()],
        vec![annual.to_correction()],
    )
    .unwrap();

    assert_eq!(doc.tax.total, december_line.computed_tax);
    assert_eq!(doc.tax.correction, Some(annual.correction));

    let payments = RecordingPayments::default();
    let finalized =
        SettlementGate::transition(&doc, DocumentStatus::Finalized, &mapping(), &payments)
            .unwrap();
    let settled =
        SettlementGate::transition(&finalized, DocumentStatus::Settled, &mapping(), &payments)
            .unwrap();
    assert_eq!(settled.status, DocumentStatus::Settled);

    let requests = payments.requests.lock().unwrap();
    let withholding = requests[0]
        .components
        .iter()
        .find(|c| c.category.is_none())
        .unwrap();
    assert_eq!(
        withholding.amount,
        december_line.computed_tax + annual.correction
    );
}

// ============================================================================
// Test: Cross-period payroll ranges
// ============================================================================
#[test]
fn test_cross_period_range_strict_and_warn() {
    let input = PeriodInput::Range {
        start: date(2025, 1, 15),
        end: date(2025, 2, 14),
    };

    let strict = PeriodResolver::resolve(input, PeriodMode::Strict);
    assert!(matches!(strict, Err(PeriodError::CrossPeriod { .. })));

    let warned = PeriodResolver::resolve(input, PeriodMode::Warn).unwrap();
    assert_eq!(warned.period.month().number(), 1);
    assert!(warned.warning.is_some());
}

// ============================================================================
// Test: Unreconciled and empty documents cannot be finalized
// ============================================================================
#[test]
fn test_finalize_guards() {
    let payments = RecordingPayments::default();
    let period = PeriodResolver::from_label("Juni 2025").unwrap();
    let empty = AggregationDocument::new(CompanyId::new(), period);

    assert_eq!(
        SettlementGate::transition(&empty, DocumentStatus::Finalized, &mapping(), &payments),
        Err(SettlementError::EmptyAggregation)
    );

    let employee = EmployeeId::new();
    let lines = ContributionCalculator::calculate(
        employee,
        dec!(5000000),
        Participation::default(),
        &ContributionRates::default(),
    )
    .unwrap();
    let doc = SettlementGate::populate(&empty, lines, Vec::new(), Vec::new()).unwrap();
    let doc = SettlementGate::enter_account_totals(
        &doc,
        vec![AccountTotal {
            account: "2141".to_string(),
            amount: doc.contribution_total() + dec!(0.2),
        }],
    )
    .unwrap();

    let result = SettlementGate::transition(&doc, DocumentStatus::Finalized, &mapping(), &payments);
    assert!(matches!(result, Err(SettlementError::Unreconciled { .. })));
    assert_eq!(doc.status, DocumentStatus::Open);
    assert_eq!(payments.calls.load(Ordering::SeqCst), 0);
}
