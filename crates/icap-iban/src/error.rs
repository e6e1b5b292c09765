//! IBAN codec error types

use icap_core::CoreError;
use thiserror::Error;

/// Result type for IBAN operations
pub type Result<T> = std::result::Result<T, IbanError>;

/// Errors in IBAN encoding and decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IbanError {
    /// Address failed shape validation
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    /// A required compound argument is missing
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// IBAN is not in the direct length class and does not encode an address
    #[error("IBAN is not direct (length {length}) and cannot be converted to an address")]
    NotDirect { length: usize },

    /// Character outside A-Z / 0-9
    #[error("Invalid IBAN character: {0:?}")]
    InvalidCharacter(char),

    /// MOD-97-10 input contains a non-decimal character
    #[error("Not a decimal digit string: {0:?}")]
    NotDecimal(String),

    /// Decoded payload does not fit the address width
    #[error("IBAN payload does not fit in a {bytes}-byte address")]
    ValueOutOfRange { bytes: usize },

    /// Error from the core crate
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IbanError {
    /// Stable numeric code, used as the CLI exit status
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidAddress(_) => 10,
            Self::InvalidArguments(_) => 20,
            Self::NotDirect { .. } => 21,
            Self::InvalidCharacter(_) | Self::NotDecimal(_) => 22,
            Self::ValueOutOfRange { .. } => 23,
            Self::Core(inner) => inner.code(),
        }
    }
}
