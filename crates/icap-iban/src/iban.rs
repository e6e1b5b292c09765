//! The `Iban` value type

use crate::codec::{self, IbanCodec};
use crate::error::Result;
use icap_core::ChecksumAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An IBAN string under the `XE` country code.
///
/// Construction does not validate; use [`Iban::is_valid`] and
/// [`Iban::has_valid_checksum`] before trusting external input.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iban(String);

impl Iban {
    /// Wrap a string as an IBAN
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Encode a hex address with the default profile
    pub fn from_address(address: &str) -> Result<Self> {
        codec::address_to_iban(address)
    }

    /// Assemble from a BBAN payload, computing the check digits
    pub fn from_bban(bban: &str) -> Result<Self> {
        codec::bban_to_iban(bban)
    }

    /// Build an indirect IBAN
    pub fn create_indirect(institution: &str, identifier: &str) -> Result<Self> {
        codec::create_indirect(institution, identifier)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check digits (characters 3 and 4)
    pub fn checksum(&self) -> Option<&str> {
        self.0.get(2..4)
    }

    /// Everything after the country code and check digits
    pub fn bban(&self) -> Option<&str> {
        self.0.get(4..)
    }

    pub fn institution(&self) -> Option<&str> {
        codec::institution(&self.0)
    }

    pub fn client(&self) -> Option<&str> {
        codec::client(&self.0)
    }

    pub fn is_direct(&self) -> bool {
        codec::is_direct(&self.0)
    }

    pub fn is_indirect(&self) -> bool {
        codec::is_indirect(&self.0)
    }

    pub fn is_well_formed(&self) -> bool {
        codec::is_well_formed(&self.0)
    }

    pub fn is_valid(&self) -> bool {
        codec::is_valid(&self.0)
    }

    pub fn has_valid_checksum(&self) -> bool {
        codec::has_valid_checksum(&self.0)
    }

    /// Decode with the default profile
    pub fn to_address(&self) -> Result<ChecksumAddress> {
        codec::iban_to_address(&self.0)
    }

    /// Decode with a specific codec
    pub fn to_address_with(&self, codec: &IbanCodec) -> Result<ChecksumAddress> {
        codec.iban_to_address(&self.0)
    }
}

impl fmt::Debug for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iban({})", self.0)
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Iban {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Iban {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Iban> for String {
    fn from(iban: Iban) -> Self {
        iban.0
    }
}
