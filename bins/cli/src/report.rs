//! JSON reports printed by the commands.

use payroll_id_core::bpjs::CategoryTotal;
use payroll_id_core::period::Locale;
use payroll_id_core::reconciliation::{ReconciliationResult, ReconciliationService, Tolerance};
use payroll_id_core::settlement::{AggregationDocument, DocumentStatus, PaymentReference};
use payroll_id_core::tax::TaxAggregate;
use payroll_id_shared::types::{CompanyId, DocumentId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::batch::PreparedBatch;

/// Reconciliation outcome with its readable message.
#[derive(Debug, Serialize)]
pub struct ReconciliationReport {
    /// The comparison.
    #[serde(flatten)]
    pub result: ReconciliationResult,
    /// Readable summary.
    pub message: String,
}

/// Output of `summarize`.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    /// Document.
    pub document_id: DocumentId,
    /// Employer.
    pub company_id: CompanyId,
    /// Period label in the configured locale.
    pub period: String,
    /// Cross-period and tax mismatch notices.
    pub warnings: Vec<String>,
    /// BPJS totals per category.
    pub category_totals: Vec<CategoryTotal>,
    /// Sum of category totals.
    pub contribution_total: Decimal,
    /// PPh 21 totals.
    pub tax: TaxAggregate,
    /// Contributions plus withholding, including any December correction.
    pub payable_total: Decimal,
    /// Present when account totals were entered.
    pub reconciliation: Option<ReconciliationReport>,
}

impl SummaryReport {
    /// Builds the report for a prepared batch.
    pub fn new(prepared: &PreparedBatch, locale: Locale, tolerance: Tolerance) -> Self {
        let doc = &prepared.document;

        let mut warnings: Vec<String> = prepared
            .resolution
            .warning
            .iter()
            .map(ToString::to_string)
            .collect();
        warnings.extend(doc.tax_warnings().iter().map(ToString::to_string));

        let reconciliation = (!doc.account_totals.is_empty()).then(|| {
            let result = ReconciliationService::reconcile_with(
                doc.category_totals.as_slice(),
                doc.account_totals.as_slice(),
                tolerance,
            );
            ReconciliationReport {
                message: result.message(),
                result,
            }
        });

        Self {
            document_id: doc.id,
            company_id: doc.key.company_id,
            period: doc.period().label(locale),
            warnings,
            category_totals: doc.category_totals.clone(),
            contribution_total: doc.contribution_total(),
            tax: doc.tax.clone(),
            payable_total: doc.payable_total(),
            reconciliation,
        }
    }
}

/// Output of `settle`.
#[derive(Debug, Serialize)]
pub struct SettleReport {
    /// Period label in the configured locale.
    pub period: String,
    /// Final status.
    pub status: DocumentStatus,
    /// Created payment.
    pub payment_reference: Option<PaymentReference>,
    /// The settled document.
    pub document: AggregationDocument,
}

impl SettleReport {
    /// Wraps a settled document.
    pub fn new(document: AggregationDocument, locale: Locale) -> Self {
        Self {
            period: document.period().label(locale),
            status: document.status,
            payment_reference: document.payment_reference.clone(),
            document,
        }
    }
}
