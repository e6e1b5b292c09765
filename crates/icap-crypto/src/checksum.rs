//! Checksum-cased address encoding
//!
//! The lowercase hex digits of an address are hashed as ASCII text. Each
//! letter `a-f` at position `i` is uppercased when nibble `i` of the digest
//! is 8 or more; digits are left alone. The value bits never change, only
//! the rendering.

use crate::hash::{nibble, ChecksumHasher};
use icap_core::error::Result;
use icap_core::validation::{is_single_case, strip_hex_prefix, validate_address};
use icap_core::{Address, AddressProfile, ChecksumAddress};

/// Render an already decoded address with checksum casing
pub fn checksum_address<H: ChecksumHasher + ?Sized>(address: &Address, hasher: &H) -> ChecksumAddress {
    let lower = address.hex_digits();
    let digest = hasher.digest(lower.as_bytes());

    let mut rendered = String::with_capacity(lower.len() + 2);
    rendered.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        if c.is_ascii_alphabetic() && nibble(&digest, i) >= 8 {
            rendered.push(c.to_ascii_uppercase());
        } else {
            rendered.push(c);
        }
    }

    ChecksumAddress::new_unchecked(address.clone(), rendered)
}

/// Convert a hex address to its checksum-cased form.
///
/// The input may carry a `0x` prefix and use any case; it must have exactly
/// the profile's width.
pub fn to_checksum_address(address: &str, profile: &AddressProfile) -> Result<ChecksumAddress> {
    let digits = validate_address(address, profile.byte_len)?;
    let parsed = Address::parse(digits, profile.byte_len)?;
    Ok(checksum_address(&parsed, &profile.hash))
}

/// Verify the casing of a checksum address.
///
/// The comparison is case-sensitive and ignores only the `0x` prefix. Any
/// malformed input (wrong length, non-hex characters) yields `false`.
pub fn check_address_checksum(address: &str, profile: &AddressProfile) -> bool {
    match to_checksum_address(address, profile) {
        Ok(expected) => {
            let matches = strip_hex_prefix(expected.as_str()) == strip_hex_prefix(address);
            if !matches {
                tracing::trace!(address = %address, expected = %expected, "checksum casing mismatch");
            }
            matches
        }
        Err(_) => false,
    }
}

/// Shape-valid and either single-case or correctly checksum-cased.
///
/// Single-case input carries no checksum information and is accepted as is.
pub fn is_strict_address(address: &str, profile: &AddressProfile) -> bool {
    match validate_address(address, profile.byte_len) {
        Ok(digits) if is_single_case(digits) => true,
        Ok(_) => check_address_checksum(address, profile),
        Err(_) => false,
    }
}
