//! Core payroll logic for Payroll Indonesia.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every operation is a synchronous function over explicit inputs; nothing here
//! caches totals or touches global state.
//!
//! # Modules
//!
//! - `period` - Period key resolution and month labels
//! - `bpjs` - BPJS contribution calculation and category aggregation
//! - `tax` - PPh 21 (TER and progressive) calculation and period aggregation
//! - `reconciliation` - Comparing component totals against account totals
//! - `settlement` - Aggregation document lifecycle and payment gating

pub mod bpjs;
pub mod period;
pub mod reconciliation;
pub mod settlement;
pub mod tax;
