//! Error types for ICAP core operations

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while handling addresses, numerals and configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // === Address Errors ===
    /// Address failed shape validation (length or hex charset)
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    /// Raw byte input has the wrong length
    #[error("Invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Address width outside what the codec supports
    #[error("Unsupported address width: {0} bytes (supported: 1..=32)")]
    UnsupportedWidth(usize),

    // === Numeral Errors ===
    /// Character is not a digit in the requested radix
    #[error("Invalid digit {digit:?} for radix {radix}")]
    InvalidDigit { digit: char, radix: u32 },

    /// Radix outside 2..=36
    #[error("Unsupported radix: {0}")]
    UnsupportedRadix(u32),

    /// Numeral has no digits
    #[error("Empty numeral")]
    EmptyNumeral,

    /// Value does not fit in the target width
    #[error("Value does not fit in {bytes} bytes")]
    Overflow { bytes: usize },

    // === Configuration Errors ===
    /// Configuration could not be read, parsed or failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Stable numeric code, used as the CLI exit status
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidAddress(_) | Self::InvalidLength { .. } => 10,
            Self::UnsupportedWidth(_) => 11,
            Self::InvalidDigit { .. } | Self::EmptyNumeral => 12,
            Self::UnsupportedRadix(_) => 13,
            Self::Overflow { .. } => 14,
            Self::Config(_) => 78,
        }
    }
}
