//! # Program Configuration
//!
//! Load-time parameters of a program instance. Every field has a default
//! matching the reference deployment, so a partial JSON file is enough.

use crate::domain::registry::RoleRegistry;
use crate::domain::value_objects::constants::{
    BONUS_POOL_RESERVATION, COOLDOWN_SECS, PAY_DATE_OFFSET_SECS, REFERENCE_ASSET_BALANCE,
    REQUIRED_CREATION_ARGS, REWARD_PER_HEAD,
};
use crate::domain::value_objects::{Amount, Timestamp};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters fixed when a program is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgramConfig {
    /// Eligible participants. Size and uniqueness are checked on load.
    pub registry: RoleRegistry,
    /// Asset balance recorded as `total_supply` at creation.
    pub asset_balance: Amount,
    /// Amount moved into the bonus pool at closeout.
    pub bonus_pool_reservation: Amount,
    /// Nominal per-claim reward recorded at creation.
    pub reward_per_head: Amount,
    /// Distance from creation time to the first allowed claim.
    pub pay_date_offset_secs: Timestamp,
    /// Wait before a repeat claim, counted from the pay date.
    pub cooldown_secs: Timestamp,
    /// Exact argument count a creation call must carry.
    pub required_creation_args: usize,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            registry: RoleRegistry::reference(),
            asset_balance: REFERENCE_ASSET_BALANCE,
            bonus_pool_reservation: BONUS_POOL_RESERVATION,
            reward_per_head: REWARD_PER_HEAD,
            pay_date_offset_secs: PAY_DATE_OFFSET_SECS,
            cooldown_secs: COOLDOWN_SECS,
            required_creation_args: REQUIRED_CREATION_ARGS,
        }
    }
}

impl ProgramConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// - `RegistrySize` / `DuplicateMember` if the registry is malformed
    /// - `ReservationTooLarge` if the pool cannot be carved out of the balance
    pub fn validate(&self) -> Result<(), ConfigError> {
        RoleRegistry::new(self.registry.members().to_vec())?;
        if self.bonus_pool_reservation > self.asset_balance {
            return Err(ConfigError::ReservationTooLarge {
                reservation: self.bonus_pool_reservation,
                balance: self.asset_balance,
            });
        }
        Ok(())
    }
}
