//! Monetary amount helpers with fixed decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the mart is a `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places amounts are stored with (cents).
pub const AMOUNT_SCALE: u32 = 2;

/// Number of decimal places variance ratios are stored with.
pub const PERCENT_SCALE: u32 = 4;

/// Largest magnitude accepted for a single amount, in whole currency units.
///
/// Sums over any realistic row count stay far inside `Decimal`'s range.
pub const MAX_ABS_AMOUNT: i64 = 1_000_000_000_000_000;

/// Rounds an amount to `scale` decimal places, midpoint away from zero.
#[must_use]
pub fn round_amount(amount: Decimal, scale: u32) -> Decimal {
    amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns true if the amount carries significant digits beyond `scale`.
///
/// Trailing zeros do not count: `1.500` has a scale of 2 for this purpose.
#[must_use]
pub fn has_excess_precision(amount: Decimal, scale: u32) -> bool {
    amount.normalize().scale() > scale
}

/// Returns true if the amount's magnitude exceeds `MAX_ABS_AMOUNT`.
#[must_use]
pub fn exceeds_amount_limit(amount: Decimal) -> bool {
    amount.abs() > Decimal::from(MAX_ABS_AMOUNT)
}

/// Formats an amount with exactly `scale` decimal places.
#[must_use]
pub fn format_amount(amount: Decimal, scale: u32) -> String {
    let mut rounded = round_amount(amount, scale);
    rounded.rescale(scale);
    rounded.to_string()
}
