//! Shared types, errors, and configuration for Payroll Indonesia.
//!
//! This crate provides common types used across all other crates:
//! - Rupiah rounding with decimal precision
//! - Typed IDs for companies, employees, and aggregation documents
//! - Application-wide error classification
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
