//! # ICAP Cryptography
//!
//! Hashing and checksum casing for ICAP addresses:
//! - Keccak-256 and BLAKE3 digests behind the `ChecksumHasher` trait
//! - Checksum-cased address rendering and verification
//!
//! | Profile digest | Algorithm | Output |
//! |----------------|-----------|--------|
//! | `keccak256` | Keccak-256 (pre-NIST padding) | 256-bit |
//! | `blake3` | BLAKE3 | 256-bit |
//!
//! A 256-bit digest has 64 nibbles, one per hex digit of the widest
//! (32-byte) address.

pub mod checksum;
pub mod hash;

pub use checksum::*;
pub use hash::*;

/// Cryptographic prelude
pub mod prelude {
    pub use crate::checksum::{check_address_checksum, to_checksum_address};
    pub use crate::hash::{hash_blake3, keccak256, ChecksumHasher};
}
