//! # Value Objects
//!
//! Immutable domain primitives for the reward program.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Token amount (smallest asset unit).
pub type Amount = u64;

/// Ledger timestamp (unix seconds).
pub type Timestamp = u64;

// =============================================================================
// ADDRESS (32 bytes)
// =============================================================================

/// A 32-byte ledger account identity (public key).
///
/// Serialized as a lowercase hex string so it can be used as a JSON map key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an address from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[30..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Address parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    /// Decoded length was not 32 bytes.
    #[error("invalid address length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(trimmed).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(AddressParseError::InvalidLength(bytes.len()))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// BYTES (opaque transaction arguments)
// =============================================================================

/// Opaque byte string, hex-encoded on the wire.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Creates empty bytes.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates bytes from a slice.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Self {
        Self(slice.to_vec())
    }

    /// Big-endian encoding of an integer, as a client would pass an amount.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes().to_vec())
    }

    /// Returns the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret as a big-endian unsigned integer of at most 8 bytes.
    ///
    /// Empty input decodes to zero. Returns None when longer than 8 bytes.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        if self.0.len() > 8 {
            return None;
        }
        Some(self.0.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes(0x{})", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let trimmed = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(trimmed)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// PROGRAM ID
// =============================================================================

/// Host-assigned identifier of a deployed program instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub u64);

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program#{}", self.0)
    }
}

// =============================================================================
// PROGRAM CONSTANTS
// =============================================================================

/// Reference values of the reward program.
pub mod constants {
    use super::{Amount, Timestamp};

    /// One cooldown period: 28 days in seconds.
    pub const COOLDOWN_SECS: Timestamp = 2_419_200;

    /// Offset from creation to the first allowed pay date.
    pub const PAY_DATE_OFFSET_SECS: Timestamp = COOLDOWN_SECS;

    /// Nominal reward per claim.
    pub const REWARD_PER_HEAD: Amount = 5_000;

    /// Amount reserved into the bonus pool at closeout.
    pub const BONUS_POOL_RESERVATION: Amount = 500_000;

    /// Asset balance backing the program in the reference deployment.
    pub const REFERENCE_ASSET_BALANCE: Amount = 700_000;

    /// Exact number of arguments a creation transaction must carry.
    pub const REQUIRED_CREATION_ARGS: usize = 5;

    /// Exact number of identities in the role registry.
    pub const REGISTRY_SIZE: usize = 5;

    /// Current schema version of persisted global and local state.
    pub const SCHEMA_VERSION: u64 = 1;
}
