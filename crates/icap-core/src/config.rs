//! Codec configuration types
//!
//! Loaded from TOML; every section and field has a default so an empty file
//! is a valid configuration.
//!
//! ```toml
//! [address]
//! byte_len = 20
//! hash = "keccak256"
//!
//! [iban]
//! bban_pad_len = 30
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use crate::error::{CoreError, Result};
use crate::types::{AddressProfile, HashAlgorithm, DEFAULT_ADDRESS_BYTES, MAX_ADDRESS_BYTES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// BBAN width that keeps every 20-byte address a direct IBAN (34 or 35 chars)
pub const DEFAULT_BBAN_PAD_LEN: usize = 30;

/// Short padding used by older encoders
pub const LEGACY_BBAN_PAD_LEN: usize = 15;

/// Longest BBAN pad accepted by validation
pub const MAX_BBAN_PAD_LEN: usize = 64;

/// Complete codec configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Address profile settings
    #[serde(default)]
    pub address: AddressSettings,

    /// IBAN encoding settings
    #[serde(default)]
    pub iban: IbanSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Address width and checksum hash
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSettings {
    /// Address width in bytes
    #[serde(default = "default_byte_len")]
    pub byte_len: usize,

    /// Checksum casing digest
    #[serde(default)]
    pub hash: HashAlgorithm,
}

fn default_byte_len() -> usize {
    DEFAULT_ADDRESS_BYTES
}

impl Default for AddressSettings {
    fn default() -> Self {
        Self {
            byte_len: default_byte_len(),
            hash: HashAlgorithm::default(),
        }
    }
}

/// IBAN encoding settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbanSettings {
    /// Minimum BBAN width; shorter base-36 payloads are left-padded with '0'
    #[serde(default = "default_bban_pad_len")]
    pub bban_pad_len: usize,
}

fn default_bban_pad_len() -> usize {
    DEFAULT_BBAN_PAD_LEN
}

impl Default for IbanSettings {
    fn default() -> Self {
        Self {
            bban_pad_len: default_bban_pad_len(),
        }
    }
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl CodecConfig {
    /// Named configuration presets.
    ///
    /// - `icap`: 20-byte addresses, Keccak-256 casing, 30-char BBAN
    /// - `legacy`: as `icap` with the short 15-char BBAN padding
    /// - `wide`: 32-byte addresses with BLAKE3 casing
    pub fn for_preset(name: &str) -> Result<Self> {
        let mut config = Self::default();
        match name {
            "icap" => {}
            "legacy" => config.iban.bban_pad_len = LEGACY_BBAN_PAD_LEN,
            "wide" => {
                config.address.byte_len = MAX_ADDRESS_BYTES;
                config.address.hash = HashAlgorithm::Blake3;
            }
            other => return Err(CoreError::Config(format!("unknown preset: {}", other))),
        }
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded codec config");
        Self::from_toml_str(&content)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let byte_len = self.address.byte_len;
        if byte_len == 0 || byte_len > MAX_ADDRESS_BYTES {
            return Err(CoreError::Config(format!(
                "address.byte_len must be within 1..={}, got {}",
                MAX_ADDRESS_BYTES, byte_len
            )));
        }

        let pad = self.iban.bban_pad_len;
        if pad == 0 || pad > MAX_BBAN_PAD_LEN {
            return Err(CoreError::Config(format!(
                "iban.bban_pad_len must be within 1..={}, got {}",
                MAX_BBAN_PAD_LEN, pad
            )));
        }

        Ok(())
    }

    /// The address profile described by this configuration
    pub fn profile(&self) -> Result<AddressProfile> {
        AddressProfile::new(self.address.byte_len, self.address.hash)
    }
}
