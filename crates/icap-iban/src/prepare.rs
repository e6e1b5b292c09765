//! ISO 13616 preparation: rearrange and transliterate to decimal digits

use crate::error::{IbanError, Result};
use crate::mod9710::DecimalDigits;

/// Characters moved from the front to the back before transliteration
const ROTATE_LEN: usize = 4;

/// Prepare an IBAN (or IBAN-shaped string) for MOD-97-10.
///
/// The input is uppercased, its first four characters are moved to the end,
/// then digits pass through and letters `A..=Z` become `10..=35`.
pub fn prepare(s: &str) -> Result<DecimalDigits> {
    if let Some(bad) = s.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(IbanError::InvalidCharacter(bad));
    }

    // ASCII only from here, byte offsets are char offsets
    let upper = s.to_ascii_uppercase();
    let split = upper.len().min(ROTATE_LEN);
    let (front, back) = upper.split_at(split);

    let mut digits = String::with_capacity(upper.len() * 2);
    for c in back.chars().chain(front.chars()) {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            // 'A'..='Z' -> 10..=35
            let value = c as u32 - 'A' as u32 + 10;
            digits.push_str(&value.to_string());
        }
    }

    Ok(DecimalDigits::from_trusted(digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearrange_and_map() {
        assert_eq!(prepare("XE00ABC").unwrap().as_str(), "101112331400");
        assert_eq!(
            prepare("GB82WEST12345698765432").unwrap().as_str(),
            "3214282912345698765432161182"
        );
    }

    #[test]
    fn test_lowercase_input_is_uppercased() {
        assert_eq!(prepare("xe00abc").unwrap(), prepare("XE00ABC").unwrap());
    }

    #[test]
    fn test_short_input() {
        assert_eq!(prepare("AB").unwrap().as_str(), "1011");
        assert_eq!(prepare("").unwrap().as_str(), "");
    }

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(prepare("0000A").unwrap().as_str(), "100000");
        assert_eq!(prepare("0000Z").unwrap().as_str(), "350000");
    }

    #[test]
    fn test_rejects_non_alphanumeric() {
        assert_eq!(prepare("XE00-ABC"), Err(IbanError::InvalidCharacter('-')));
        assert_eq!(prepare("XE00ÄBC"), Err(IbanError::InvalidCharacter('Ä')));
    }
}
