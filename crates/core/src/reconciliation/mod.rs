//! Reconciliation of entered totals against computed totals.
//!
//! Compares what was posted (account totals, or any other figure) with
//! what the contribution and tax lines say should have been posted.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::ReconciliationService;
pub use types::{
    AccountTotal, Direction, ReconciliationResult, TOLERANCE, Tolerance, TotalSource,
};
