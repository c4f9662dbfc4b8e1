//! Display helpers for cash, dollar and hour amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount here is a `rust_decimal::Decimal` or a whole-dollar `u64`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for dollar amounts.
pub const CENTS_SCALE: u32 = 2;

/// Formats a dollar amount with exactly two decimals, e.g. `$52.98`.
///
/// Display rounding is half away from zero, so `52.975` shows as `$52.98`.
/// Negative amounts render as `-$0.50`.
#[must_use]
pub fn format_dollars(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENTS_SCALE);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", rounded.abs())
    } else {
        format!("${}", rounded.abs())
    }
}

/// Formats a whole-dollar cash amount, e.g. `$53`.
#[must_use]
pub fn format_cash(amount: u64) -> String {
    format!("${amount}")
}

/// Formats hours without trailing zeros, e.g. `32.50` becomes `32.5`.
#[must_use]
pub fn format_hours(hours: Decimal) -> String {
    hours.normalize().to_string()
}
