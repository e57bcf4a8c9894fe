//! In-process payment service for command-line settles.

use std::sync::atomic::{AtomicU64, Ordering};

use payroll_id_core::settlement::{PaymentError, PaymentReference, PaymentRequest, PaymentService};
use tracing::info;

/// Issues sequential payment entry references without contacting any system.
#[derive(Debug, Default)]
pub struct LocalPayments {
    issued: AtomicU64,
}

impl LocalPayments {
    /// Number of payments created so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

impl PaymentService for LocalPayments {
    fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentReference, PaymentError> {
        if request.components.is_empty() {
            return Err(PaymentError::Rejected("payment has no components".to_string()));
        }
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let reference = PaymentReference::new(format!(
            "PE-{}-{:02}-{sequence:05}",
            request.period.year(),
            request.period.month().number()
        ));
        info!(
            payment = %reference,
            components = request.components.len(),
            total = %request.total(),
            "payment entry created"
        );
        Ok(reference)
    }
}
