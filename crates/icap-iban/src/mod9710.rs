//! ISO 7064 MOD-97-10 over decimal digit strings
//!
//! Digit strings produced by transliteration are far too long for a machine
//! integer. The remainder is folded chunk by chunk instead: the running
//! remainder (at most two digits) followed by seven more digits always fits
//! in a `u64`, giving the same result as a single big-integer `mod 97`.

use crate::error::{IbanError, Result};
use std::fmt;
use std::str::FromStr;

const MODULUS: u64 = 97;

/// Width of the first chunk
const HEAD_CHUNK: usize = 9;

/// Fresh digits per subsequent chunk, leaving room for the carried remainder
const TAIL_CHUNK: usize = 7;

/// A string made only of ASCII decimal digits
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DecimalDigits(String);

impl DecimalDigits {
    /// Validate a digit string
    pub fn new(digits: impl Into<String>) -> Result<Self> {
        let digits = digits.into();
        if digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(digits))
        } else {
            Err(IbanError::NotDecimal(digits))
        }
    }

    /// Caller guarantees `digits` holds only ASCII digits
    pub(crate) fn from_trusted(digits: String) -> Self {
        debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DecimalDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecimalDigits({})", self.0)
    }
}

impl fmt::Display for DecimalDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DecimalDigits {
    type Err = IbanError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

fn fold_digits(digits: &[u8]) -> u64 {
    digits
        .iter()
        .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'))
}

/// Remainder of the digit string modulo 97, in `0..=96`.
///
/// An empty string has remainder 0.
pub fn mod9710(digits: &DecimalDigits) -> u8 {
    let bytes = digits.as_str().as_bytes();
    let (head, mut rest) = bytes.split_at(bytes.len().min(HEAD_CHUNK));
    let mut remainder = fold_digits(head) % MODULUS;

    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(rest.len().min(TAIL_CHUNK));
        remainder = (remainder * 10u64.pow(chunk.len() as u32) + fold_digits(chunk)) % MODULUS;
        rest = tail;
    }

    remainder as u8
}
