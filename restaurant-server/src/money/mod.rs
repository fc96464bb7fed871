//! Money calculation utilities using rust_decimal for precision
//!
//! Prices arrive and leave as `f64` (JSON numbers). Arithmetic and rounding
//! happen in `Decimal`, so 19.995 rounds to 20.00 instead of falling victim
//! to its binary representation.

use rust_decimal::prelude::*;
use std::str::FromStr;

/// Rounding precision for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Goes through the shortest round-trip text form, so the Decimal holds the
/// number the client actually wrote (19.995, not 19.99499999...).
/// Non-finite input (NaN, infinity) becomes zero and is logged.
pub fn to_decimal(value: f64) -> Decimal {
    if !value.is_finite() {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        return Decimal::ZERO;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or_else(|| {
            tracing::error!(value = ?value, "f64 out of Decimal range, defaulting to zero");
            Decimal::ZERO
        })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_else(|| {
            tracing::error!(value = %value, "Decimal out of f64 range, defaulting to zero");
            0.0
        })
}

/// Fixed-point normalization applied to every price before it is stored
#[inline]
pub fn normalize_price(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Sum prices exactly, then round once
pub fn sum_prices<I>(prices: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(prices.into_iter().map(to_decimal).sum())
}
