//! Settlement gate for aggregation document transitions.
//!
//! Every operation takes the current document by reference and returns an
//! updated copy, so a rejected operation leaves the caller's state intact.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::bpjs::{ContributionAggregator, ContributionLine};
use crate::reconciliation::{AccountTotal, ReconciliationService, Tolerance};
use crate::settlement::error::SettlementError;
use crate::settlement::payment::PaymentService;
use crate::settlement::types::{
    AccountMapping, AggregationDocument, DocumentStatus, PaymentComponent, PaymentRequest,
    WITHHOLDING_TAX_COMPONENT,
};
use crate::tax::{TaxAggregator, TaxCorrection, TaxLine};

/// Stateless service for aggregation document changes.
pub struct SettlementGate;

impl SettlementGate {
    /// Rejects the call if `doc` is not at `version`.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::VersionMismatch` on a stale version.
    pub fn expect_version(doc: &AggregationDocument, version: u64) -> Result<(), SettlementError> {
        if doc.version != version {
            return Err(SettlementError::VersionMismatch {
                expected: version,
                actual: doc.version,
            });
        }
        Ok(())
    }

    /// Replaces the document's lines and recomputes its totals.
    ///
    /// # Errors
    ///
    /// See [`SettlementGate::populate_with`].
    pub fn populate(
        doc: &AggregationDocument,
        contribution_lines: Vec<ContributionLine>,
        tax_lines: Vec<TaxLine>,
        corrections: Vec<TaxCorrection>,
    ) -> Result<AggregationDocument, SettlementError> {
        Self::populate_with(
            doc,
            contribution_lines,
            tax_lines,
            corrections,
            Tolerance::default(),
        )
    }

    /// Replaces the document's lines and recomputes its totals.
    ///
    /// Category totals and tax totals are rebuilt from scratch; nothing from
    /// a previous population survives.
    ///
    /// # Errors
    ///
    /// - `SettlementError::DocumentLocked` unless the document is open
    /// - `SettlementError::Contribution` / `SettlementError::Tax` if the
    ///   lines are rejected by aggregation
    pub fn populate_with(
        doc: &AggregationDocument,
        contribution_lines: Vec<ContributionLine>,
        tax_lines: Vec<TaxLine>,
        corrections: Vec<TaxCorrection>,
        tolerance: Tolerance,
    ) -> Result<AggregationDocument, SettlementError> {
        Self::ensure_editable(doc)?;

        let category_totals = ContributionAggregator::aggregate(&contribution_lines)?;
        let tax = TaxAggregator::aggregate_with(&tax_lines, doc.period(), &corrections, tolerance)?;

        debug!(
            document_id = %doc.id,
            key = %doc.key,
            categories = category_totals.len(),
            tax_total = %tax.total,
            "populated aggregation document"
        );

        Ok(AggregationDocument {
            contribution_lines,
            tax_lines,
            corrections,
            category_totals,
            tax,
            version: doc.version + 1,
            ..doc.clone()
        })
    }

    /// Replaces the totals entered against GL accounts.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::DocumentLocked` unless the document is open.
    pub fn enter_account_totals(
        doc: &AggregationDocument,
        account_totals: Vec<AccountTotal>,
    ) -> Result<AggregationDocument, SettlementError> {
        Self::ensure_editable(doc)?;
        Ok(AggregationDocument {
            account_totals,
            version: doc.version + 1,
            ..doc.clone()
        })
    }

    /// Moves the document to `target` using the default tolerance.
    ///
    /// # Errors
    ///
    /// See [`SettlementGate::transition_with`].
    pub fn transition<P: PaymentService + ?Sized>(
        doc: &AggregationDocument,
        target: DocumentStatus,
        mapping: &AccountMapping,
        payments: &P,
    ) -> Result<AggregationDocument, SettlementError> {
        Self::transition_with(doc, target, mapping, payments, Tolerance::default())
    }

    /// Moves the document to `target`.
    ///
    /// Open to Finalized needs a positive total and, if account totals were
    /// entered, a successful reconciliation. Finalized to Settled needs an
    /// account for every payment component and calls `payments` exactly
    /// once. Settling a finalized or settled document that already holds a
    /// payment reference returns it as settled without calling `payments`
    /// again. An open document always has to be finalized first.
    ///
    /// # Errors
    ///
    /// - `SettlementError::EmptyAggregation` when finalizing nothing
    /// - `SettlementError::Unreconciled` when account totals disagree
    /// - `SettlementError::IncompleteMapping` when an account is missing
    /// - `SettlementError::Payment` when the payment service fails
    /// - `SettlementError::InvalidTransition` for any other transition
    pub fn transition_with<P: PaymentService + ?Sized>(
        doc: &AggregationDocument,
        target: DocumentStatus,
        mapping: &AccountMapping,
        payments: &P,
        tolerance: Tolerance,
    ) -> Result<AggregationDocument, SettlementError> {
        let settles_again = target == DocumentStatus::Settled
            && doc.payment_reference.is_some()
            && matches!(doc.status, DocumentStatus::Finalized | DocumentStatus::Settled);
        if settles_again {
            return Ok(Self::resettle(doc));
        }

        match (doc.status, target) {
            (DocumentStatus::Open, DocumentStatus::Finalized) => Self::finalize(doc, tolerance),
            (DocumentStatus::Finalized, DocumentStatus::Settled) => {
                Self::settle(doc, mapping, payments)
            }
            (from, to) => Err(SettlementError::InvalidTransition { from, to }),
        }
    }

    /// Builds the payment request a settle would send, without sending it.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::IncompleteMapping` listing every component
    /// with no mapped account.
    pub fn payment_request(
        doc: &AggregationDocument,
        mapping: &AccountMapping,
    ) -> Result<PaymentRequest, SettlementError> {
        let mut components = Vec::with_capacity(doc.category_totals.len() + 1);
        let mut missing = Vec::new();

        for total in doc.category_totals.iter().filter(|t| t.amount > Decimal::ZERO) {
            match mapping.account_for(total.category) {
                Some(account) => components.push(PaymentComponent {
                    name: total.category.component_name().to_string(),
                    category: Some(total.category),
                    account: account.to_string(),
                    amount: total.amount,
                }),
                None => missing.push(total.category.component_name().to_string()),
            }
        }

        let withholding = doc.tax.payable();
        if !withholding.is_zero() {
            match mapping.withholding_tax_account() {
                Some(account) => components.push(PaymentComponent {
                    name: WITHHOLDING_TAX_COMPONENT.to_string(),
                    category: None,
                    account: account.to_string(),
                    amount: withholding,
                }),
                None => missing.push(WITHHOLDING_TAX_COMPONENT.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(SettlementError::IncompleteMapping { missing });
        }

        Ok(PaymentRequest {
            document_id: doc.id,
            company_id: doc.key.company_id,
            period: doc.period(),
            components,
        })
    }

    fn finalize(
        doc: &AggregationDocument,
        tolerance: Tolerance,
    ) -> Result<AggregationDocument, SettlementError> {
        if !doc.has_positive_totals() {
            return Err(SettlementError::EmptyAggregation);
        }

        if !doc.account_totals.is_empty() {
            let result = ReconciliationService::reconcile_with(
                doc.category_totals.as_slice(),
                doc.account_totals.as_slice(),
                tolerance,
            );
            if !result.within_tolerance {
                return Err(SettlementError::Unreconciled { result });
            }
        }

        info!(
            document_id = %doc.id,
            key = %doc.key,
            total = %doc.payable_total(),
            "aggregation document finalized"
        );

        Ok(AggregationDocument {
            status: DocumentStatus::Finalized,
            version: doc.version + 1,
            ..doc.clone()
        })
    }

    fn settle<P: PaymentService + ?Sized>(
        doc: &AggregationDocument,
        mapping: &AccountMapping,
        payments: &P,
    ) -> Result<AggregationDocument, SettlementError> {
        let request = Self::payment_request(doc, mapping)?;
        let reference = payments.create_payment(&request)?;

        info!(
            document_id = %doc.id,
            key = %doc.key,
            payment = %reference,
            total = %request.total(),
            "aggregation document settled"
        );

        Ok(AggregationDocument {
            status: DocumentStatus::Settled,
            payment_reference: Some(reference),
            version: doc.version + 1,
            ..doc.clone()
        })
    }

    fn resettle(doc: &AggregationDocument) -> AggregationDocument {
        warn!(
            document_id = %doc.id,
            key = %doc.key,
            payment = ?doc.payment_reference,
            "payment already exists, not creating another"
        );
        if doc.status == DocumentStatus::Settled {
            return doc.clone();
        }
        AggregationDocument {
            status: DocumentStatus::Settled,
            version: doc.version + 1,
            ..doc.clone()
        }
    }

    fn ensure_editable(doc: &AggregationDocument) -> Result<(), SettlementError> {
        if doc.status.is_editable() {
            Ok(())
        } else {
            Err(SettlementError::DocumentLocked { status: doc.status })
        }
    }
}
