//! # ICAP Core
//!
//! Core building blocks shared by the ICAP codec crates:
//! - `Address` / `ChecksumAddress` - fixed-width account identifiers
//! - `AddressProfile` - chain-specific width and checksum digest
//! - `radix` - base-2..36 conversion over 256-bit integers
//! - `validation` - address shape checks
//! - `config` - TOML configuration
//!
//! ## Representations
//!
//! ```text
//!   0x00c5496aee77c1ba1f0854206a26dda82a81d6d8    Address (lowercase hex)
//!   0x00c5496aEe77C1bA1f0854206A26DdA82a81D6D8    ChecksumAddress
//!   XE7338O073KYGTWWZN0F2WZ0R8PX5ZPPZS            IBAN (icap-iban)
//! ```

pub mod config;
pub mod error;
pub mod radix;
pub mod types;
pub mod validation;

pub use config::*;
pub use error::*;
pub use types::*;
pub use validation::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::CodecConfig;
    pub use crate::error::{CoreError, Result};
    pub use crate::types::{Address, AddressProfile, ChecksumAddress, HashAlgorithm};
    pub use crate::validation::{is_valid_address, strip_hex_prefix};
}
