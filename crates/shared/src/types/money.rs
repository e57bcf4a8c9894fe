//! Rupiah amount rounding.
//!
//! CRITICAL: Never use floating-point for payroll amounts.
//! All amounts are `rust_decimal::Decimal`; this module fixes the stored scale.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for stored currency amounts.
pub const CURRENCY_PRECISION: u32 = 2;

/// Rounds an amount to [`CURRENCY_PRECISION`] decimal places, half away from zero.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}
