//! BBAN/IBAN codec and address <-> IBAN conversion
//!
//! ```text
//!   address ──hex──► U256 ──base36──► pad ──► BBAN ──MOD-97-10──► XE + check + BBAN
//!   IBAN (direct) ──strip XEnn──► base36 ──► U256 ──fixed hex──► checksum casing
//! ```
//!
//! Direct IBANs (34 or 35 characters) carry a whole address. Indirect IBANs
//! (20 characters) carry an institution code and a client identifier and do
//! not decode to an address.

use crate::error::{IbanError, Result};
use crate::iban::Iban;
use crate::mod9710::mod9710;
use crate::prepare::prepare;
use icap_core::config::{CodecConfig, DEFAULT_BBAN_PAD_LEN};
use icap_core::{radix, validation, Address, AddressProfile, ChecksumAddress, CoreError};
use icap_crypto::checksum::checksum_address;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;

/// The single synthetic country code of this scheme
pub const COUNTRY_CODE: &str = "XE";

/// Asset code opening every indirect BBAN
pub const INDIRECT_ASSET_CODE: &str = "AIO";

/// Lengths of a direct IBAN
pub const DIRECT_LENGTHS: RangeInclusive<usize> = 34..=35;

/// Length of an indirect IBAN
pub const INDIRECT_LENGTH: usize = 20;

/// Institution code width in an indirect IBAN
pub const INSTITUTION_LEN: usize = 4;

/// Client identifier width in an indirect IBAN
pub const IDENTIFIER_LEN: usize = 9;

/// Country code plus check digits
const HEADER_LEN: usize = 4;

const INSTITUTION_OFFSET: usize = HEADER_LEN + INDIRECT_ASSET_CODE.len();
const CLIENT_OFFSET: usize = INSTITUTION_OFFSET + INSTITUTION_LEN;

/// Structural shape of a well-formed IBAN. Does not cover the check digits.
static IBAN_SHAPE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^XE[0-9]{2}(AIO[0-9A-Z]{13}|[0-9A-Z]{30,31})$").ok());

/// Length class of a direct IBAN (encodes a full address)
pub fn is_direct(iban: &str) -> bool {
    DIRECT_LENGTHS.contains(&iban.len())
}

/// Length class of an indirect IBAN (institution + client)
pub fn is_indirect(iban: &str) -> bool {
    iban.len() == INDIRECT_LENGTH
}

/// Structural check: country code, two check digits, alphanumeric payload
pub fn is_well_formed(iban: &str) -> bool {
    IBAN_SHAPE.as_ref().is_some_and(|re| re.is_match(iban))
}

/// Format validity only; the check digits are not verified.
///
/// Use [`has_valid_checksum`] as well when integrity matters.
pub fn is_valid(iban: &str) -> bool {
    is_well_formed(iban)
}

/// MOD-97-10 verification of the check digits
pub fn has_valid_checksum(iban: &str) -> bool {
    prepare(iban).map(|digits| mod9710(&digits) == 1).unwrap_or(false)
}

/// Two check digits for a BBAN under the `XE` country code
pub fn check_digits(bban: &str) -> Result<String> {
    let digits = prepare(&format!("{}00{}", COUNTRY_CODE, bban))?;
    let remainder = mod9710(&digits);
    Ok(format!("{:02}", 98 - remainder))
}

/// Assemble an IBAN from a BBAN payload. The payload is uppercased.
pub fn bban_to_iban(bban: &str) -> Result<Iban> {
    let bban = bban.to_ascii_uppercase();
    let check = check_digits(&bban)?;
    Ok(Iban::new(format!("{}{}{}", COUNTRY_CODE, check, bban)))
}

/// Build an indirect IBAN from an institution code and a client identifier
pub fn create_indirect(institution: &str, identifier: &str) -> Result<Iban> {
    if institution.is_empty() || identifier.is_empty() {
        return Err(IbanError::InvalidArguments(
            "institution and identifier are both required".to_string(),
        ));
    }
    if institution.len() != INSTITUTION_LEN {
        return Err(IbanError::InvalidArguments(format!(
            "institution must be {} characters, got {}",
            INSTITUTION_LEN,
            institution.len()
        )));
    }
    if identifier.len() != IDENTIFIER_LEN {
        return Err(IbanError::InvalidArguments(format!(
            "identifier must be {} characters, got {}",
            IDENTIFIER_LEN,
            identifier.len()
        )));
    }

    bban_to_iban(&format!("{}{}{}", INDIRECT_ASSET_CODE, institution, identifier))
}

/// Institution code of an indirect IBAN
pub fn institution(iban: &str) -> Option<&str> {
    if is_indirect(iban) {
        iban.get(INSTITUTION_OFFSET..CLIENT_OFFSET)
    } else {
        None
    }
}

/// Client identifier of an indirect IBAN
pub fn client(iban: &str) -> Option<&str> {
    if is_indirect(iban) {
        iban.get(CLIENT_OFFSET..)
    } else {
        None
    }
}

/// Encode an address with the default ICAP profile
pub fn address_to_iban(address: &str) -> Result<Iban> {
    IbanCodec::default().address_to_iban(address)
}

/// Decode a direct IBAN with the default ICAP profile
pub fn iban_to_address(iban: &str) -> Result<ChecksumAddress> {
    IbanCodec::default().iban_to_address(iban)
}

/// Address <-> IBAN conversion for one address profile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IbanCodec {
    profile: AddressProfile,
    bban_pad_len: usize,
}

impl IbanCodec {
    /// Create a codec; a zero pad width is treated as no padding
    pub fn new(profile: AddressProfile, bban_pad_len: usize) -> Self {
        Self {
            profile,
            bban_pad_len,
        }
    }

    /// Build from a validated configuration
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.profile()?, config.iban.bban_pad_len))
    }

    pub fn profile(&self) -> &AddressProfile {
        &self.profile
    }

    pub fn bban_pad_len(&self) -> usize {
        self.bban_pad_len
    }

    /// Encode a hex address (prefix optional, any case) as an IBAN
    pub fn address_to_iban(&self, address: &str) -> Result<Iban> {
        let digits = validation::validate_address(address, self.profile.byte_len)
            .map_err(|_| IbanError::InvalidAddress(address.to_string()))?;

        let value = radix::parse_radix(digits, 16)?;
        let iban = self.value_to_iban(value)?;
        tracing::debug!(address = %address, iban = %iban, "encoded address as IBAN");
        Ok(iban)
    }

    /// Encode a decoded address; its width must match the profile
    pub fn encode(&self, address: &Address) -> Result<Iban> {
        if address.byte_len() != self.profile.byte_len {
            return Err(IbanError::InvalidAddress(address.to_hex()));
        }
        let value = radix::from_be_bytes(address.as_bytes())?;
        self.value_to_iban(value)
    }

    fn value_to_iban(&self, value: alloy_primitives::U256) -> Result<Iban> {
        let base36 = radix::format_radix(value, 36)?;
        let bban = radix::pad_left(&base36, self.bban_pad_len).to_ascii_uppercase();
        bban_to_iban(&bban)
    }

    /// Decode a direct IBAN into a checksum-cased address.
    ///
    /// Non-direct input fails with [`IbanError::NotDirect`]. The check digits
    /// are not verified here; see [`has_valid_checksum`].
    pub fn iban_to_address(&self, iban: &str) -> Result<ChecksumAddress> {
        if !is_direct(iban) {
            return Err(IbanError::NotDirect { length: iban.len() });
        }
        if let Some(bad) = iban.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(IbanError::InvalidCharacter(bad));
        }

        let byte_len = self.profile.byte_len;
        let out_of_range = |e: CoreError| match e {
            CoreError::Overflow { .. } => IbanError::ValueOutOfRange { bytes: byte_len },
            CoreError::InvalidDigit { digit, .. } => IbanError::InvalidCharacter(digit),
            other => IbanError::Core(other),
        };

        let payload = &iban[HEADER_LEN..];
        let value = radix::parse_radix(payload, 36).map_err(out_of_range)?;
        let hex = radix::to_fixed_hex(value, byte_len).map_err(out_of_range)?;
        let address = Address::from_hex(&hex)?;

        if !has_valid_checksum(iban) {
            tracing::debug!(iban = %iban, "decoding IBAN with invalid check digits");
        }

        Ok(checksum_address(&address, &self.profile.hash))
    }
}

impl Default for IbanCodec {
    fn default() -> Self {
        Self::new(AddressProfile::ICAP, DEFAULT_BBAN_PAD_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icap_core::config::LEGACY_BBAN_PAD_LEN;
    use icap_core::HashAlgorithm;

    const ICAP_ADDRESS: &str = "0x00c5496aEe77C1bA1f0854206A26DdA82a81D6D8";
    const ICAP_IBAN: &str = "XE7338O073KYGTWWZN0F2WZ0R8PX5ZPPZS";

    #[test]
    fn test_known_vector_encode() {
        let iban = address_to_iban(ICAP_ADDRESS).unwrap();
        assert_eq!(iban.as_str(), ICAP_IBAN);

        // Case and prefix do not matter on input
        let lower = ICAP_ADDRESS[2..].to_lowercase();
        assert_eq!(address_to_iban(&lower).unwrap().as_str(), ICAP_IBAN);
    }

    #[test]
    fn test_known_vector_decode() {
        let address = iban_to_address(ICAP_IBAN).unwrap();
        assert_eq!(address.as_str(), ICAP_ADDRESS);
    }

    #[test]
    fn test_smallest_address_is_direct() {
        let address = format!("0x{}1", "0".repeat(39));
        let iban = address_to_iban(&address).unwrap();

        assert_eq!(iban.as_str(), "XE23000000000000000000000000000001");
        assert!(is_direct(iban.as_str()));
        assert!(iban.as_str().starts_with("XE"));

        let value = radix::parse_radix(&iban.as_str()[4..], 36).unwrap();
        assert_eq!(value, alloy_primitives::U256::from(1u64));
    }

    #[test]
    fn test_zero_and_max_addresses() {
        let zero = address_to_iban(&format!("0x{}", "0".repeat(40))).unwrap();
        assert_eq!(zero.as_str(), "XE50000000000000000000000000000000");

        let max = address_to_iban(&format!("0x{}", "f".repeat(40))).unwrap();
        assert_eq!(max.as_str(), "XE95TWJ4YIDKW7A8PN4G709KZMFOAOL3X8F");
        assert_eq!(max.as_str().len(), 35);

        let back = iban_to_address(max.as_str()).unwrap();
        assert_eq!(back.as_str(), "0xFFfFfFffFFfffFFfFFfFFFFFffFFFffffFfFFFfF");
    }

    #[test]
    fn test_legacy_padding() {
        let codec = IbanCodec::new(AddressProfile::ICAP, LEGACY_BBAN_PAD_LEN);
        let iban = codec.address_to_iban(&format!("0x{}1", "0".repeat(39))).unwrap();

        // Short padding leaves small values outside the direct length class
        assert_eq!(iban.as_str(), "XE23000000000000001");
        assert!(!is_direct(iban.as_str()));

        // Full-size values are unaffected
        assert_eq!(codec.address_to_iban(ICAP_ADDRESS).unwrap().as_str(), ICAP_IBAN);
    }

    #[test]
    fn test_invalid_address() {
        assert_eq!(
            address_to_iban("0x1234"),
            Err(IbanError::InvalidAddress("0x1234".to_string()))
        );
        assert!(matches!(
            address_to_iban(&format!("0x{}", "x".repeat(40))),
            Err(IbanError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_not_direct() {
        assert_eq!(iban_to_address(""), Err(IbanError::NotDirect { length: 0 }));
        assert_eq!(
            iban_to_address("XE80AIOXREGGAVOFYORK"),
            Err(IbanError::NotDirect { length: 20 })
        );
    }

    #[test]
    fn test_decode_out_of_range() {
        // Base-36 payload equal to 2^160
        assert_eq!(
            iban_to_address("XE68TWJ4YIDKW7A8PN4G709KZMFOAOL3X8G"),
            Err(IbanError::ValueOutOfRange { bytes: 20 })
        );
    }

    #[test]
    fn test_decode_bad_character() {
        let bad = format!("XE73{}", "-".repeat(30));
        assert_eq!(iban_to_address(&bad), Err(IbanError::InvalidCharacter('-')));
    }

    #[test]
    fn test_bban_to_iban_checksum() {
        let iban = bban_to_iban("38O073KYGTWWZN0F2WZ0R8PX5ZPPZS").unwrap();
        assert_eq!(iban.as_str(), ICAP_IBAN);
        assert_eq!(mod9710(&prepare(iban.as_str()).unwrap()), 1);

        // Lowercase payloads are normalized
        let lower = bban_to_iban("38o073kygtwwzn0f2wz0r8px5zppzs").unwrap();
        assert_eq!(lower, iban);
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(check_digits("AIOXREGGAVOFYORK").unwrap(), "80");
        assert_eq!(check_digits(&"0".repeat(30)).unwrap(), "50");
        assert!(matches!(check_digits("AB C"), Err(IbanError::InvalidCharacter(' '))));
    }

    #[test]
    fn test_indirect() {
        let iban = create_indirect("XREG", "GAVOFYORK").unwrap();
        assert_eq!(iban.as_str(), "XE80AIOXREGGAVOFYORK");
        assert!(is_indirect(iban.as_str()));
        assert!(!is_direct(iban.as_str()));
        assert_eq!(institution(iban.as_str()), Some("XREG"));
        assert_eq!(client(iban.as_str()), Some("GAVOFYORK"));
    }

    #[test]
    fn test_indirect_missing_arguments() {
        assert!(matches!(
            create_indirect("", "GAVOFYORK"),
            Err(IbanError::InvalidArguments(_))
        ));
        assert!(matches!(
            create_indirect("XREG", ""),
            Err(IbanError::InvalidArguments(_))
        ));
        assert!(matches!(
            create_indirect("XREGX", "GAVOFYORK"),
            Err(IbanError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_accessors_on_direct_iban() {
        assert_eq!(institution(ICAP_IBAN), None);
        assert_eq!(client(ICAP_IBAN), None);
    }

    #[test]
    fn test_length_classes() {
        for len in 0..60 {
            let s = "X".repeat(len);
            assert!(!(is_direct(&s) && is_indirect(&s)));
            assert_eq!(is_direct(&s), len == 34 || len == 35);
            assert_eq!(is_indirect(&s), len == 20);
        }
    }

    #[test]
    fn test_well_formed_vs_checksum() {
        assert!(is_valid(ICAP_IBAN));
        assert!(has_valid_checksum(ICAP_IBAN));

        // Right shape, wrong check digits
        let tampered = "XE0038O073KYGTWWZN0F2WZ0R8PX5ZPPZS";
        assert!(is_well_formed(tampered));
        assert!(is_valid(tampered));
        assert!(!has_valid_checksum(tampered));

        assert!(is_well_formed("XE80AIOXREGGAVOFYORK"));
        assert!(!is_well_formed("XE80ETHXREGGAVOFYORK"));
        assert!(!is_well_formed("GB82WEST12345698765432"));
        assert!(!is_well_formed("xe7338o073kygtwwzn0f2wz0r8px5zppzs"));
        assert!(!has_valid_checksum("XE73-"));
    }

    #[test]
    fn test_wide_profile_is_not_direct() {
        let profile = AddressProfile::new(32, HashAlgorithm::Blake3).unwrap();
        let codec = IbanCodec::new(profile, DEFAULT_BBAN_PAD_LEN);

        let iban = codec.address_to_iban(&format!("0x{}", "f".repeat(64))).unwrap();
        assert_eq!(iban.as_str().len(), 54);
        assert!(has_valid_checksum(iban.as_str()));
        assert_eq!(
            codec.iban_to_address(iban.as_str()),
            Err(IbanError::NotDirect { length: 54 })
        );

        // Small values still fit the direct class and decode at full width
        let small = codec.address_to_iban(&format!("0x{}2a", "0".repeat(62))).unwrap();
        let back = codec.iban_to_address(small.as_str()).unwrap();
        assert!(back.eq_ignore_case(&format!("0x{}2a", "0".repeat(62))));
    }

    #[test]
    fn test_encode_decoded_address() {
        let codec = IbanCodec::default();
        let address = Address::from_hex(ICAP_ADDRESS).unwrap();
        assert_eq!(codec.encode(&address).unwrap().as_str(), ICAP_IBAN);

        let short = Address::from_hex("0x00c5").unwrap();
        assert!(matches!(codec.encode(&short), Err(IbanError::InvalidAddress(_))));
    }

    #[test]
    fn test_from_config() {
        let config = CodecConfig::for_preset("legacy").unwrap();
        let codec = IbanCodec::from_config(&config).unwrap();
        assert_eq!(codec.bban_pad_len(), LEGACY_BBAN_PAD_LEN);
        assert_eq!(codec.profile(), &AddressProfile::ICAP);
    }
}
