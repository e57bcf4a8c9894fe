//! Settlement error types.

use thiserror::Error;

use crate::bpjs::BpjsError;
use crate::reconciliation::ReconciliationResult;
use crate::settlement::payment::PaymentError;
use crate::settlement::types::DocumentStatus;
use crate::tax::TaxError;

/// Errors that can occur while changing an aggregation document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: DocumentStatus,
        /// The attempted target status.
        to: DocumentStatus,
    },

    /// Nothing to finalize: no positive category or tax total.
    #[error("Cannot finalize an aggregation with no positive totals")]
    EmptyAggregation,

    /// Entered account totals do not match the component totals.
    #[error("Account totals do not reconcile: {result}")]
    Unreconciled {
        /// The failed comparison.
        result: ReconciliationResult,
    },

    /// Some payment components have no account to post against.
    #[error("No account mapped for: {}", .missing.join(", "))]
    IncompleteMapping {
        /// Names of the unmapped components.
        missing: Vec<String>,
    },

    /// Lines can only change while the document is open.
    #[error("Document is {status} and can no longer be changed")]
    DocumentLocked {
        /// The current status.
        status: DocumentStatus,
    },

    /// The document changed since the caller read it.
    #[error("Document version is {actual}, expected {expected}")]
    VersionMismatch {
        /// Version the caller holds.
        expected: u64,
        /// Current version.
        actual: u64,
    },

    /// Contribution lines were rejected.
    #[error(transparent)]
    Contribution(#[from] BpjsError),

    /// Tax lines were rejected.
    #[error(transparent)]
    Tax(#[from] TaxError),

    /// The payment service failed.
    #[error("Payment creation failed: {0}")]
    Payment(#[from] PaymentError),
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::EmptyAggregation => "EMPTY_AGGREGATION",
            Self::Unreconciled { .. } => "UNRECONCILED",
            Self::IncompleteMapping { .. } => "INCOMPLETE_MAPPING",
            Self::DocumentLocked { .. } => "DOCUMENT_LOCKED",
            Self::VersionMismatch { .. } => "VERSION_MISMATCH",
            Self::Contribution(err) => err.error_code(),
            Self::Tax(err) => err.error_code(),
            Self::Payment(_) => "PAYMENT_FAILED",
        }
    }

    /// Returns the HTTP status code a host API should report.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Contribution(_) | Self::Tax(_) => 400,
            Self::InvalidTransition { .. }
            | Self::DocumentLocked { .. }
            | Self::VersionMismatch { .. } => 409,
            Self::EmptyAggregation | Self::Unreconciled { .. } | Self::IncompleteMapping { .. } => {
                422
            }
            Self::Payment(_) => 502,
        }
    }
}

impl From<SettlementError> for payroll_id_shared::AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::Contribution(inner) => inner.into(),
            SettlementError::Tax(inner) => inner.into(),
            SettlementError::InvalidTransition { .. }
            | SettlementError::DocumentLocked { .. }
            | SettlementError::VersionMismatch { .. } => Self::Conflict(err.to_string()),
            SettlementError::EmptyAggregation
            | SettlementError::Unreconciled { .. }
            | SettlementError::IncompleteMapping { .. } => Self::BusinessRule(err.to_string()),
            SettlementError::Payment(_) => Self::ExternalService(err.to_string()),
        }
    }
}
