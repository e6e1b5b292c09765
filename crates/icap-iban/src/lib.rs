//! # ICAP IBAN
//!
//! Converts blockchain account addresses to and from IBAN-formatted strings
//! under the synthetic `XE` country code.
//!
//! ## Layout
//!
//! ```text
//!   direct    XE nn <base-36 address, 30..31 chars>          34..35 chars
//!   indirect  XE nn AIO <institution:4> <client:9>           20 chars
//! ```
//!
//! `nn` is the ISO 7064 MOD-97-10 check pair: after moving the first four
//! characters to the end and replacing `A..=Z` with `10..=35`, the resulting
//! decimal number is congruent to 1 modulo 97.
//!
//! ## Example
//!
//! ```
//! use icap_iban::prelude::*;
//!
//! let iban = address_to_iban("0x00c5496aee77c1ba1f0854206a26dda82a81d6d8").unwrap();
//! assert_eq!(iban.as_str(), "XE7338O073KYGTWWZN0F2WZ0R8PX5ZPPZS");
//!
//! let address = iban_to_address(iban.as_str()).unwrap();
//! assert_eq!(address.as_str(), "0x00c5496aEe77C1bA1f0854206A26DdA82a81D6D8");
//! ```

pub mod codec;
pub mod error;
pub mod iban;
pub mod mod9710;
pub mod prepare;

pub use codec::*;
pub use error::*;
pub use iban::*;
pub use mod9710::{mod9710, DecimalDigits};
pub use prepare::prepare;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{
        address_to_iban, bban_to_iban, create_indirect, has_valid_checksum, iban_to_address,
        is_valid, IbanCodec,
    };
    pub use crate::error::{IbanError, Result};
    pub use crate::iban::Iban;
}
