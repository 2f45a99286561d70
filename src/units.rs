//! Conversion between human-readable token amounts and raw integer units
//!
//! Raw amounts are `U256` in the token's smallest unit. Decimals reported by a
//! token contract are untrusted input and are checked before any arithmetic.

use crate::{Error, Result};
use alloy::primitives::U256;

/// Largest decimals value whose scale factor (10^decimals) fits in a `U256`.
pub const MAX_DECIMALS: u8 = 77;

/// Scale a decimal string such as `"0.003"` into raw token units.
///
/// Fractional digits beyond `decimals` are truncated, never rounded.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    if decimals > MAX_DECIMALS {
        return Err(Error::InvalidAmount(format!(
            "token reports {} decimals, at most {} are supported",
            decimals, MAX_DECIMALS
        )));
    }

    let (whole, fraction) = split_decimal(amount)?;

    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(whole);
    let kept = fraction.len().min(decimals as usize);
    digits.push_str(&fraction[..kept]);
    for _ in kept..decimals as usize {
        digits.push('0');
    }

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(&digits, 10).map_err(|_| {
        Error::InvalidAmount(format!(
            "{} with {} decimals does not fit in 256 bits",
            amount, decimals
        ))
    })
}

/// Check that `amount` is a well-formed non-negative decimal string.
pub fn validate_amount(amount: &str) -> Result<()> {
    split_decimal(amount).map(|_| ())
}

fn split_decimal(amount: &str) -> Result<(&str, &str)> {
    let trimmed = amount.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(Error::InvalidAmount(format!("'{}' is not a number", amount)));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Error::InvalidAmount(format!(
            "'{}' is not a non-negative decimal number",
            amount
        )));
    }

    Ok((whole, fraction))
}

/// Format a raw amount with `decimals` places, trimming trailing zeros.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    if decimals == 0 || decimals > MAX_DECIMALS {
        return value.to_string();
    }

    let divisor = U256::from(10).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        return whole.to_string();
    }

    let remainder_str = format!("{:0>width$}", remainder, width = decimals as usize);
    let trimmed = remainder_str.trim_end_matches('0');
    format!("{}.{}", whole, trimmed)
}
