//! # Role Registry
//!
//! Fixed set of identities eligible to opt in and claim rewards.
//! Cardinality is validated once, at construction; the set never changes afterwards.

use super::value_objects::{constants::REGISTRY_SIZE, Address};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Size-checked, immutable set of ambassador identities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Address>", into = "Vec<Address>")]
pub struct RoleRegistry {
    members: Vec<Address>,
}

impl RoleRegistry {
    /// Build a registry, rejecting wrong cardinality and duplicates.
    pub fn new(members: Vec<Address>) -> Result<Self, ConfigError> {
        if members.len() != REGISTRY_SIZE {
            return Err(ConfigError::RegistrySize {
                expected: REGISTRY_SIZE,
                actual: members.len(),
            });
        }
        for (i, member) in members.iter().enumerate() {
            if members[..i].contains(member) {
                return Err(ConfigError::DuplicateMember(*member));
            }
        }
        Ok(Self { members })
    }

    /// True iff `identity` equals one of the registered members.
    #[must_use]
    pub fn contains(&self, identity: &Address) -> bool {
        self.members.iter().any(|member| member == identity)
    }

    /// Registered members in configuration order.
    #[must_use]
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    /// Number of members (always `REGISTRY_SIZE`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for a constructed registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// =============================================================================
// REFERENCE CONFIGURATION
// =============================================================================

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => panic!("invalid hex digit"),
    }
}

const fn hex32(s: &str) -> Address {
    let src = s.as_bytes();
    assert!(src.len() == 64, "identity must be 64 hex digits");
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        out[i] = (nibble(src[2 * i]) << 4) | nibble(src[2 * i + 1]);
        i += 1;
    }
    Address::new(out)
}

/// Identities of the reference deployment.
pub const REFERENCE_MEMBERS: [Address; REGISTRY_SIZE] = [
    hex32("69c8c5fb9a9e3671b366969154a530e0263ec685ecadd58a2e2ceb688593a272"),
    hex32("9b156cfb64e8cfa4e38643325f4a0dbd4f3ff6ccfd23fd28d71ed272932c6fb3"),
    hex32("7046f9c069bf7cdeaff6fae832f672c2a4575a68bb16492cd538138ff1e98bea"),
    hex32("0ae8b9b3372d06f2ed8d3e1f58f68f7808875c21a605c40c726a8dd967bac1d8"),
    hex32("5094a87a6654299b81ba31746a90bb0deb06357aa7ed43ffbe731e035101bad0"),
];

impl RoleRegistry {
    /// Registry of the reference deployment.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            members: REFERENCE_MEMBERS.to_vec(),
        }
    }
}

impl TryFrom<Vec<Address>> for RoleRegistry {
    type Error = ConfigError;

    fn try_from(members: Vec<Address>) -> Result<Self, Self::Error> {
        Self::new(members)
    }
}

impl From<RoleRegistry> for Vec<Address> {
    fn from(registry: RoleRegistry) -> Self {
        registry.members
    }
}
