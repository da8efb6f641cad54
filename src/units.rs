//! Conversion between on-chain smallest-unit integers and human-readable
//! decimal token amounts.
//!
//! Token amounts arrive as base-10 digit strings at uint256 scale with 18
//! implied fractional digits. Supplies overflow u64 comfortably, so the
//! conversion runs through an arbitrary-precision decimal, rounds half-up
//! at the requested precision and only then touches f64.

use std::str::FromStr;

use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};

use crate::constants::TOKEN_DECIMALS;
use crate::error::ConversionError;

/// Converts a smallest-unit amount to a decimal token amount.
///
/// `raw` must be a non-negative base-10 digit string; the result equals
/// `raw / 10^18` rounded half-up to `precision` decimal places. Anything
/// else (sign, decimal point, stray characters) is rejected.
pub fn from_smallest_unit(raw: &str, precision: u32) -> Result<f64, ConversionError> {
    // BigUint::from_str accepts a leading plus sign; no chain return
    // carries one.
    if raw.starts_with('+') {
        return Err(ConversionError {
            input: raw.to_string(),
        });
    }

    let unscaled = BigUint::from_str(raw).map_err(|_| ConversionError {
        input: raw.to_string(),
    })?;

    let rounded = BigDecimal::new(BigInt::from(unscaled), TOKEN_DECIMALS)
        .with_scale_round(i64::from(precision), RoundingMode::HalfUp);

    // The decimal-to-float step goes through the string parser, which is
    // correctly rounded for any number of digits.
    rounded.to_string().parse().map_err(|_| ConversionError {
        input: raw.to_string(),
    })
}

/// Rounds a float half-up to `places` decimal places.
///
/// For values where the operands already are floats (the 8-decimal burnt
/// sum, the 5-decimal USD price); smallest-unit strings go through
/// [`from_smallest_unit`] instead.
pub fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
