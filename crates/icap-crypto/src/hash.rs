//! Digest adapters for checksum casing
//!
//! Both digests produce 256-bit output. The checksum codec only reads the
//! digest nibble by nibble, so any 32-byte digest can be plugged in through
//! [`ChecksumHasher`].

use icap_core::HashAlgorithm;
use tiny_keccak::{Hasher, Keccak};

/// Digest length in bytes
pub const DIGEST_LEN: usize = 32;

/// Hash data using Keccak-256
pub fn keccak256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; DIGEST_LEN];
    hasher.finalize(&mut output);
    output
}

/// Hash data using BLAKE3 (256-bit output)
pub fn hash_blake3(data: &[u8]) -> [u8; DIGEST_LEN] {
    *blake3::hash(data).as_bytes()
}

/// A deterministic 256-bit digest over a byte sequence
pub trait ChecksumHasher {
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LEN];
}

/// Keccak-256 digest
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256;

impl ChecksumHasher for Keccak256 {
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        keccak256(data)
    }
}

/// BLAKE3 digest
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3;

impl ChecksumHasher for Blake3 {
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        hash_blake3(data)
    }
}

impl ChecksumHasher for HashAlgorithm {
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        match self {
            HashAlgorithm::Keccak256 => keccak256(data),
            HashAlgorithm::Blake3 => hash_blake3(data),
        }
    }
}

/// Nibble `index` of a digest, high nibble first.
///
/// `index` must be below `2 * DIGEST_LEN`.
pub fn nibble(digest: &[u8; DIGEST_LEN], index: usize) -> u8 {
    let byte = digest[index / 2];
    if index % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0f
    }
}
