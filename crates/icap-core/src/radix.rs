//! Positional-notation conversion over 256-bit integers
//!
//! Addresses are at most 32 bytes wide, so every value the codec handles
//! fits in a `U256`. Parsing is checked: a numeral that does not fit is an
//! error, never a silent wrap.

use crate::error::{CoreError, Result};
use crate::types::MAX_ADDRESS_BYTES;
use alloy_primitives::U256;

/// Smallest supported radix
pub const MIN_RADIX: u32 = 2;

/// Largest supported radix (`0-9` then `a-z`)
pub const MAX_RADIX: u32 = 36;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn check_radix(radix: u32) -> Result<()> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(CoreError::UnsupportedRadix(radix))
    }
}

/// Parse a numeral in the given radix. Letters are case-insensitive.
pub fn parse_radix(numeral: &str, radix: u32) -> Result<U256> {
    check_radix(radix)?;
    if numeral.is_empty() {
        return Err(CoreError::EmptyNumeral);
    }

    let base = U256::from(radix);
    numeral.chars().try_fold(U256::ZERO, |acc, c| {
        let digit = c
            .to_digit(radix)
            .ok_or(CoreError::InvalidDigit { digit: c, radix })?;
        acc.checked_mul(base)
            .and_then(|v| v.checked_add(U256::from(digit)))
            .ok_or(CoreError::Overflow {
                bytes: MAX_ADDRESS_BYTES,
            })
    })
}

/// Render a value in the given radix, lowercase, without leading zeros.
///
/// Zero renders as `"0"`.
pub fn format_radix(value: U256, radix: u32) -> Result<String> {
    check_radix(radix)?;
    if value.is_zero() {
        return Ok("0".to_string());
    }

    let base = U256::from(radix);
    let mut rest = value;
    let mut digits = Vec::new();
    while !rest.is_zero() {
        let (quotient, remainder) = rest.div_rem(base);
        // remainder < radix <= 36
        digits.push(DIGITS[remainder.as_limbs()[0] as usize] as char);
        rest = quotient;
    }

    Ok(digits.iter().rev().collect())
}

/// Interpret big-endian bytes as an unsigned integer
pub fn from_be_bytes(bytes: &[u8]) -> Result<U256> {
    U256::try_from_be_slice(bytes).ok_or(CoreError::Overflow {
        bytes: MAX_ADDRESS_BYTES,
    })
}

/// Render a value as exactly `2 * byte_len` lowercase hex digits.
///
/// Fails if the value needs more than `byte_len` bytes.
pub fn to_fixed_hex(value: U256, byte_len: usize) -> Result<String> {
    if byte_len == 0 || byte_len > MAX_ADDRESS_BYTES {
        return Err(CoreError::UnsupportedWidth(byte_len));
    }

    let full = value.to_be_bytes::<32>();
    let (head, tail) = full.split_at(MAX_ADDRESS_BYTES - byte_len);
    if head.iter().any(|b| *b != 0) {
        return Err(CoreError::Overflow { bytes: byte_len });
    }

    Ok(hex::encode(tail))
}

/// Left-pad a numeral with `'0'` up to `width` characters
pub fn pad_left(numeral: &str, width: usize) -> String {
    format!("{:0>width$}", numeral, width = width)
}
