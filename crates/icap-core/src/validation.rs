//! Address shape validation
//!
//! Shape checks only look at the prefix, the length and the hex charset.
//! Case-sensitive checksum verification lives in `icap-crypto`.

use crate::error::{CoreError, Result};

/// Strip an optional `0x`/`0X` prefix
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Check that every character is an ASCII hex digit (either case)
pub fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Check an address string against a fixed byte width.
///
/// Accepts an optional `0x` prefix and hex digits in any case; the digit
/// count must be exactly `2 * byte_len`.
pub fn is_valid_address(address: &str, byte_len: usize) -> bool {
    let digits = strip_hex_prefix(address);
    digits.len() == byte_len * 2 && is_hex_digits(digits)
}

/// Validate an address and return its hex digits without the prefix
pub fn validate_address(address: &str, byte_len: usize) -> Result<&str> {
    if is_valid_address(address, byte_len) {
        Ok(strip_hex_prefix(address))
    } else {
        Err(CoreError::InvalidAddress(address.to_string()))
    }
}

/// True when the letters in `digits` are all lowercase or all uppercase
pub fn is_single_case(digits: &str) -> bool {
    let letters = || digits.chars().filter(|c| c.is_ascii_alphabetic());
    letters().all(|c| c.is_ascii_lowercase()) || letters().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_hex_prefix("0xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("0Xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("abcd"), "abcd");
        assert_eq!(strip_hex_prefix("0x"), "");
    }

    #[test]
    fn test_valid_address_shapes() {
        let lower = format!("0x{}", "ab".repeat(20));
        let upper = "AB".repeat(20);

        assert!(is_valid_address(&lower, 20));
        assert!(is_valid_address(&upper, 20));
        assert!(is_valid_address(&format!("0x{}", "0".repeat(64)), 32));
    }

    #[test]
    fn test_invalid_address_shapes() {
        // Wrong length
        assert!(!is_valid_address(&format!("0x{}", "ab".repeat(19)), 20));
        assert!(!is_valid_address(&format!("0x{}a", "ab".repeat(20)), 20));

        // Non-hex characters
        assert!(!is_valid_address(&format!("0x{}zz", "ab".repeat(19)), 20));

        // Empty
        assert!(!is_valid_address("", 20));
        assert!(!is_valid_address("0x", 20));
    }

    #[test]
    fn test_validate_address_returns_digits() {
        let address = format!("0x{}", "12".repeat(20));
        assert_eq!(validate_address(&address, 20).unwrap(), "12".repeat(20));

        let err = validate_address("0x1234", 20).unwrap_err();
        assert_eq!(err, CoreError::InvalidAddress("0x1234".to_string()));
    }

    #[test]
    fn test_single_case() {
        assert!(is_single_case("abcdef0123"));
        assert!(is_single_case("ABCDEF0123"));
        assert!(is_single_case("0123456789"));
        assert!(!is_single_case("aBcdef0123"));
    }
}
