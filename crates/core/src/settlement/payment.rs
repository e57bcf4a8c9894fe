//! Downstream payment collaborator.

use thiserror::Error;

use crate::settlement::types::{PaymentReference, PaymentRequest};

/// Errors reported by a payment service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The service refused the request.
    #[error("Payment rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or failed internally.
    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

/// Creates payment entries for settled documents.
///
/// Implemented by the host system. The settlement gate calls
/// `create_payment` at most once per document.
pub trait PaymentService {
    /// Creates a payment for `request` and returns its reference.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the payment could not be created.
    fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentReference, PaymentError>;
}

impl<T: PaymentService + ?Sized> PaymentService for &T {
    fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentReference, PaymentError> {
        (**self).create_payment(request)
    }
}
