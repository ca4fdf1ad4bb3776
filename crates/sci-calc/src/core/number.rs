//! Fixed-precision decimal helpers
//!
//! Arithmetic results are rounded to a fixed number of significant digits
//! (half-up) with no limit on the exponent other than what the display can
//! render. Values that come out of `f64` math are bridged through their
//! shortest round-trip text so `sin(30°)` shows the same digits a desktop
//! calculator would.

use std::num::NonZeroU64;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};

use crate::core::{check_finite, CalcError, CalcResult};

/// Default number of significant digits kept by arithmetic
pub const DEFAULT_PRECISION: u32 = 20;

/// Largest configurable precision
pub const MAX_PRECISION: u32 = 50;

/// Largest decimal exponent, either sign, of a value the display accepts.
///
/// The display always shows plain notation, so `1E9999` is ten thousand
/// characters wide.
pub const MAX_EXPONENT: i64 = 9_999;

/// Rounds to `precision` significant digits, ties away from zero.
#[must_use]
pub fn round_significant(value: &BigDecimal, precision: u64) -> BigDecimal {
    match NonZeroU64::new(precision) {
        Some(precision) => value.with_precision_round(precision, RoundingMode::HalfUp),
        None => value.clone(),
    }
}

/// Rejects values whose exponent is beyond [`MAX_EXPONENT`].
pub fn check_range(value: BigDecimal) -> CalcResult<BigDecimal> {
    if value.is_zero() {
        return Ok(value);
    }
    let (_, scale) = value.as_bigint_and_exponent();
    let exponent = value.digits() as i64 - 1 - scale;
    if exponent.abs() > MAX_EXPONENT {
        return Err(CalcError::Overflow);
    }
    Ok(value)
}

/// Formats a value for the display: plain notation, no trailing fractional zeros.
#[must_use]
pub fn format_display(value: &BigDecimal) -> String {
    let (int, scale) = value.normalized().into_bigint_and_exponent();
    let text = int.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", text.as_str()),
    };
    if scale <= 0 {
        let zeros = "0".repeat(scale.unsigned_abs() as usize);
        return format!("{sign}{digits}{zeros}");
    }
    let scale = scale as usize;
    if digits.len() > scale {
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        format!("{sign}{whole}.{fraction}")
    } else {
        let zeros = "0".repeat(scale - digits.len());
        format!("{sign}0.{zeros}{digits}")
    }
}

/// Parses display text back into a decimal.
///
/// Accepts an optional leading minus, digits with at most one decimal point
/// (a trailing point is allowed, as in `"5."`), and an optional `E` exponent
/// marker followed by a signed integer. The value is exact; rounding happens
/// when it takes part in arithmetic.
pub fn parse_display(text: &str) -> CalcResult<BigDecimal> {
    let invalid = || CalcError::InvalidNumber(text.to_string());
    // the parser also takes `_`, `+` and `e`, none of which the keypad types
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | 'E'))
    {
        return Err(invalid());
    }
    let value = BigDecimal::from_str(text).map_err(|_| invalid())?;
    check_range(value)
}

/// Converts an `f64` result into a decimal, rejecting NaN and infinities.
pub fn from_f64(value: f64) -> CalcResult<BigDecimal> {
    let text = check_finite(value)?.to_string();
    // `{}` on f64 never switches to exponent notation
    BigDecimal::from_str(&text).map_err(|_| CalcError::InvalidNumber(text))
}

/// Converts a decimal into the nearest `f64`.
#[must_use]
pub fn to_f64(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
