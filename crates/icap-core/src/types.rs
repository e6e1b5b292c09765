//! Core type definitions for ICAP addressing
//!
//! An [`Address`] is a fixed-width byte identifier. Its width is a property of
//! the chain, captured together with the checksum hash in an
//! [`AddressProfile`]. A [`ChecksumAddress`] is the same bytes rendered with
//! mixed letter case.

use crate::error::{CoreError, Result};
use crate::validation::{is_hex_digits, strip_hex_prefix};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Widest supported address in bytes
pub const MAX_ADDRESS_BYTES: usize = 32;

/// Address width used by the default ICAP profile
pub const DEFAULT_ADDRESS_BYTES: usize = 20;

/// Digest used to derive checksum casing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// Keccak-256 (EIP-55 compatible casing)
    #[default]
    Keccak256,
    /// BLAKE3 with 256-bit output
    Blake3,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keccak256 => write!(f, "keccak256"),
            Self::Blake3 => write!(f, "blake3"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(Self::Keccak256),
            "blake3" => Ok(Self::Blake3),
            other => Err(CoreError::Config(format!("unknown hash algorithm: {}", other))),
        }
    }
}

/// Chain-specific address parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressProfile {
    /// Address width in bytes (1..=32)
    pub byte_len: usize,

    /// Checksum casing digest
    pub hash: HashAlgorithm,
}

impl AddressProfile {
    /// 20-byte addresses with Keccak-256 casing
    pub const ICAP: Self = Self {
        byte_len: DEFAULT_ADDRESS_BYTES,
        hash: HashAlgorithm::Keccak256,
    };

    /// Create a profile, rejecting unsupported widths
    pub fn new(byte_len: usize, hash: HashAlgorithm) -> Result<Self> {
        if byte_len == 0 || byte_len > MAX_ADDRESS_BYTES {
            return Err(CoreError::UnsupportedWidth(byte_len));
        }
        Ok(Self { byte_len, hash })
    }

    /// Number of hex digits in an address of this profile
    pub fn hex_len(&self) -> usize {
        self.byte_len * 2
    }
}

impl Default for AddressProfile {
    fn default() -> Self {
        Self::ICAP
    }
}

/// A fixed-width account address.
///
/// Leading zero bytes are significant: `0x00ff` and `0xff` are different
/// addresses.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    bytes: Vec<u8>,
}

impl Address {
    /// Create from raw bytes (1..=32 bytes)
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() || bytes.len() > MAX_ADDRESS_BYTES {
            return Err(CoreError::UnsupportedWidth(bytes.len()));
        }
        Ok(Self { bytes })
    }

    /// Parse a hex address of any supported width, `0x` prefix optional
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = strip_hex_prefix(s);
        if !is_hex_digits(digits) || digits.len() % 2 != 0 {
            return Err(CoreError::InvalidAddress(s.to_string()));
        }
        let bytes = hex::decode(digits).map_err(|_| CoreError::InvalidAddress(s.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Parse a hex address that must be exactly `byte_len` bytes wide
    pub fn parse(s: &str, byte_len: usize) -> Result<Self> {
        let address = Self::from_hex(s)?;
        if address.byte_len() != byte_len {
            return Err(CoreError::InvalidAddress(s.to_string()));
        }
        Ok(address)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width in bytes
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercase hex digits without prefix
    pub fn hex_digits(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Canonical `0x`-prefixed lowercase form
    pub fn to_hex(&self) -> String {
        format!("0x{}", self.hex_digits())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// An address rendered with checksum casing.
///
/// Holds both the decoded bytes and the rendered string so neither needs to
/// be recomputed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChecksumAddress {
    address: Address,
    rendered: String,
}

impl ChecksumAddress {
    /// Pair an address with its rendering.
    ///
    /// The caller guarantees `rendered` is `0x` followed by the address
    /// digits in checksum case; see `icap_crypto::checksum`.
    pub fn new_unchecked(address: Address, rendered: String) -> Self {
        Self { address, rendered }
    }

    /// The checksum-cased string, `0x` prefixed
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// The underlying address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Consume into the underlying address
    pub fn into_address(self) -> Address {
        self.address
    }

    /// Case-insensitive comparison against any hex rendering
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        strip_hex_prefix(&self.rendered).eq_ignore_ascii_case(strip_hex_prefix(other))
    }
}

impl fmt::Debug for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChecksumAddress({})", self.rendered)
    }
}

impl fmt::Display for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl AsRef<str> for ChecksumAddress {
    fn as_ref(&self) -> &str {
        &self.rendered
    }
}

impl PartialEq<str> for ChecksumAddress {
    fn eq(&self, other: &str) -> bool {
        self.rendered == other
    }
}

impl PartialEq<&str> for ChecksumAddress {
    fn eq(&self, other: &&str) -> bool {
        self.rendered == *other
    }
}

impl From<ChecksumAddress> for Address {
    fn from(checksummed: ChecksumAddress) -> Self {
        checksummed.address
    }
}

impl Serialize for ChecksumAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_roundtrip() {
        let address = Address::from_bytes([0x00, 0xab, 0xcd]).unwrap();
        assert_eq!(address.to_hex(), "0x00abcd");

        let recovered = Address::from_hex("0x00ABCD").unwrap();
        assert_eq!(address, recovered);
    }

    #[test]
    fn test_leading_zero_bytes_are_significant() {
        let short = Address::from_hex("0xff").unwrap();
        let long = Address::from_hex("0x00ff").unwrap();

        assert_ne!(short, long);
        assert_eq!(long.byte_len(), 2);
    }

    #[test]
    fn test_address_parse_width() {
        let hex = format!("0x{}", "11".repeat(20));
        assert!(Address::parse(&hex, 20).is_ok());
        assert!(matches!(
            Address::parse(&hex, 32),
            Err(CoreError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_address_rejects_bad_input() {
        assert!(Address::from_hex("0xabc").is_err()); // odd length
        assert!(Address::from_hex("0xzz").is_err());
        assert!(Address::from_hex("").is_err());
        assert_eq!(
            Address::from_bytes(vec![0u8; 33]),
            Err(CoreError::UnsupportedWidth(33))
        );
    }

    #[test]
    fn test_address_serde() {
        let address = Address::from_hex(&format!("0x{}", "ab".repeat(20))).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn test_profile_validation() {
        assert_eq!(AddressProfile::default(), AddressProfile::ICAP);
        assert_eq!(AddressProfile::ICAP.hex_len(), 40);

        assert!(AddressProfile::new(32, HashAlgorithm::Blake3).is_ok());
        assert_eq!(
            AddressProfile::new(0, HashAlgorithm::Keccak256),
            Err(CoreError::UnsupportedWidth(0))
        );
        assert_eq!(
            AddressProfile::new(33, HashAlgorithm::Keccak256),
            Err(CoreError::UnsupportedWidth(33))
        );
    }

    #[test]
    fn test_hash_algorithm_names() {
        assert_eq!("keccak256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Keccak256);
        assert_eq!("BLAKE3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake3);
        assert!("sha1".parse::<HashAlgorithm>().is_err());
        assert_eq!(HashAlgorithm::Blake3.to_string(), "blake3");
    }

    #[test]
    fn test_checksum_address_accessors() {
        let address = Address::from_hex("0xabcd").unwrap();
        let checksummed = ChecksumAddress::new_unchecked(address.clone(), "0xAbcD".to_string());

        assert_eq!(checksummed.as_str(), "0xAbcD");
        assert_eq!(checksummed, "0xAbcD");
        assert!(checksummed.eq_ignore_case("abcd"));
        assert_eq!(checksummed.address(), &address);
        assert_eq!(Address::from(checksummed), address);
    }
}
