//! Aggregation document lifecycle and payment settlement.
//!
//! Documents move Open -> Finalized -> Settled. The gate enforces the
//! preconditions of each step and calls the host's payment service once
//! on settle.

pub mod error;
pub mod payment;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::SettlementError;
pub use payment::{PaymentError, PaymentService};
pub use service::SettlementGate;
pub use types::{
    AccountMapping, AggregationDocument, DocumentStatus, PaymentComponent, PaymentReference,
    PaymentRequest, WITHHOLDING_TAX_COMPONENT,
};
