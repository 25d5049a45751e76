//! # Flat Key/Value Layout
//!
//! The ledger persists program state as string-keyed maps of unsigned
//! integers and byte strings. These conversions are the only place the
//! fixed key names appear.

use super::entities::{GlobalState, LocalState};
use super::registry::RoleRegistry;
use super::value_objects::{constants::SCHEMA_VERSION, Address};
use crate::errors::SnapshotError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A typed ledger storage value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoredValue {
    /// 64-bit unsigned integer.
    Uint(u64),
    /// Byte string (hex on the wire).
    Bytes(super::value_objects::Bytes),
}

/// One flat storage scope.
pub type KvMap = BTreeMap<String, StoredValue>;

/// Fixed storage key names.
#[allow(missing_docs)]
pub mod keys {
    pub const SCHEMA_VERSION: &str = "schema_version";
    pub const OWNER: &str = "owner";
    pub const AMBASSADOR_PREFIX: &str = "ambassador_";
    pub const APPROVED_PAY_DATE: &str = "approved_pay_date";
    pub const REWARD_PER_HEAD: &str = "reward_per_head";
    pub const TOTAL_SUPPLY: &str = "total_supply";
    pub const RESERVE: &str = "reserve";
    pub const APPROVED_BONUS_POOL: &str = "approved_bonus_pool";

    pub const BALANCE: &str = "balance";
    pub const OPTED_COUNT: &str = "opted_count";
    pub const IS_AMBASSADOR: &str = "is_ambassador";
    pub const PAY_COUNT: &str = "pay_count";
    pub const PAY_TIME: &str = "pay_time";
    pub const AUTHORIZATION_ACCOUNT: &str = "authorization_account";
}

fn put_uint(map: &mut KvMap, key: &str, value: u64) {
    map.insert(key.to_string(), StoredValue::Uint(value));
}

fn put_addr(map: &mut KvMap, key: &str, value: &Address) {
    map.insert(
        key.to_string(),
        StoredValue::Bytes(super::value_objects::Bytes::from_slice(value.as_bytes())),
    );
}

/// Reads keys out of a map, tracking which ones were consumed.
struct Reader<'a> {
    map: &'a KvMap,
    seen: BTreeSet<&'a str>,
}

impl<'a> Reader<'a> {
    fn new(map: &'a KvMap) -> Self {
        Self {
            map,
            seen: BTreeSet::new(),
        }
    }

    fn uint(&mut self, key: &str) -> Result<u64, SnapshotError> {
        match self.map.get_key_value(key) {
            Some((k, StoredValue::Uint(v))) => {
                self.seen.insert(k.as_str());
                Ok(*v)
            }
            Some((_, StoredValue::Bytes(_))) => Err(SnapshotError::TypeMismatch {
                key: key.to_string(),
                expected: "uint",
            }),
            None => Err(SnapshotError::MissingKey(key.to_string())),
        }
    }

    fn flag(&mut self, key: &str) -> Result<bool, SnapshotError> {
        self.uint(key).map(|v| v != 0)
    }

    fn address(&mut self, key: &str) -> Result<Address, SnapshotError> {
        let mismatch = || SnapshotError::TypeMismatch {
            key: key.to_string(),
            expected: "32-byte address",
        };
        match self.map.get_key_value(key) {
            Some((k, StoredValue::Bytes(b))) => {
                let addr = Address::from_slice(b.as_slice()).ok_or_else(mismatch)?;
                self.seen.insert(k.as_str());
                Ok(addr)
            }
            Some((_, StoredValue::Uint(_))) => Err(mismatch()),
            None => Err(SnapshotError::MissingKey(key.to_string())),
        }
    }

    fn schema(&mut self) -> Result<u64, SnapshotError> {
        let version = self.uint(keys::SCHEMA_VERSION)?;
        if version != SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedSchema(version));
        }
        Ok(version)
    }

    /// Fails on the first key that was never read.
    fn finish(self) -> Result<(), SnapshotError> {
        match self.map.keys().find(|k| !self.seen.contains(k.as_str())) {
            Some(unknown) => Err(SnapshotError::UnknownKey(unknown.clone())),
            None => Ok(()),
        }
    }
}

fn ambassador_key(index: usize) -> String {
    format!("{}{index}", keys::AMBASSADOR_PREFIX)
}

impl GlobalState {
    /// Flatten into the ledger's global key/value layout.
    #[must_use]
    pub fn to_kv(&self) -> KvMap {
        let mut map = KvMap::new();
        put_uint(&mut map, keys::SCHEMA_VERSION, self.schema_version);
        put_addr(&mut map, keys::OWNER, &self.owner);
        for (i, member) in self.registry.members().iter().enumerate() {
            put_addr(&mut map, &ambassador_key(i), member);
        }
        put_uint(&mut map, keys::APPROVED_PAY_DATE, self.approved_pay_date);
        put_uint(&mut map, keys::REWARD_PER_HEAD, self.reward_per_head);
        put_uint(&mut map, keys::TOTAL_SUPPLY, self.total_supply);
        put_uint(&mut map, keys::RESERVE, self.reserve);
        put_uint(&mut map, keys::APPROVED_BONUS_POOL, self.approved_bonus_pool);
        map
    }

    /// Rebuild from the global key/value layout.
    pub fn from_kv(map: &KvMap) -> Result<Self, SnapshotError> {
        let mut r = Reader::new(map);
        let schema_version = r.schema()?;
        let owner = r.address(keys::OWNER)?;
        let mut members = Vec::new();
        let mut index = 0;
        while map.contains_key(&ambassador_key(index)) {
            members.push(r.address(&ambassador_key(index))?);
            index += 1;
        }
        let registry = RoleRegistry::new(members)?;
        let state = Self {
            schema_version,
            owner,
            registry,
            approved_pay_date: r.uint(keys::APPROVED_PAY_DATE)?,
            reward_per_head: r.uint(keys::REWARD_PER_HEAD)?,
            total_supply: r.uint(keys::TOTAL_SUPPLY)?,
            reserve: r.uint(keys::RESERVE)?,
            approved_bonus_pool: r.uint(keys::APPROVED_BONUS_POOL)?,
        };
        r.finish()?;
        Ok(state)
    }
}

impl LocalState {
    /// Flatten into the ledger's local key/value layout.
    #[must_use]
    pub fn to_kv(&self) -> KvMap {
        let mut map = KvMap::new();
        put_uint(&mut map, keys::SCHEMA_VERSION, self.schema_version);
        put_uint(&mut map, keys::BALANCE, self.balance);
        put_uint(&mut map, keys::OPTED_COUNT, self.opted_count);
        put_uint(&mut map, keys::IS_AMBASSADOR, u64::from(self.is_ambassador));
        put_uint(&mut map, keys::PAY_COUNT, self.pay_count);
        put_uint(&mut map, keys::PAY_TIME, self.pay_time);
        put_uint(
            &mut map,
            keys::AUTHORIZATION_ACCOUNT,
            u64::from(self.authorization_account),
        );
        map
    }

    /// Rebuild from the local key/value layout.
    pub fn from_kv(map: &KvMap) -> Result<Self, SnapshotError> {
        let mut r = Reader::new(map);
        let state = Self {
            schema_version: r.schema()?,
            balance: r.uint(keys::BALANCE)?,
            opted_count: r.uint(keys::OPTED_COUNT)?,
            is_ambassador: r.flag(keys::IS_AMBASSADOR)?,
            pay_count: r.uint(keys::PAY_COUNT)?,
            pay_time: r.uint(keys::PAY_TIME)?,
            authorization_account: r.flag(keys::AUTHORIZATION_ACCOUNT)?,
        };
        r.finish()?;
        Ok(state)
    }
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Typed image of every scope of one program.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Global scope, absent before creation.
    pub global: Option<GlobalState>,
    /// Local scopes by account.
    pub locals: BTreeMap<Address, LocalState>,
}

/// Flat image of every scope of one program, as the ledger stores it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvSnapshot {
    /// Global scope, empty before creation.
    pub global: KvMap,
    /// Local scopes by account.
    pub locals: BTreeMap<Address, KvMap>,
}

impl StateSnapshot {
    /// Flatten every scope.
    #[must_use]
    pub fn to_kv(&self) -> KvSnapshot {
        KvSnapshot {
            global: self.global.as_ref().map(GlobalState::to_kv).unwrap_or_default(),
            locals: self
                .locals
                .iter()
                .map(|(addr, local)| (*addr, local.to_kv()))
                .collect(),
        }
    }

    /// Rebuild every scope.
    pub fn from_kv(kv: &KvSnapshot) -> Result<Self, SnapshotError> {
        let global = if kv.global.is_empty() {
            None
        } else {
            Some(GlobalState::from_kv(&kv.global)?)
        };
        let locals = kv
            .locals
            .iter()
            .map(|(addr, map)| LocalState::from_kv(map).map(|local| (*addr, local)))
            .collect::<Result<_, _>>()?;
        Ok(Self { global, locals })
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Decode from JSON. Every scope must carry the current schema version.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        let versions = snapshot
            .global
            .iter()
            .map(|g| g.schema_version)
            .chain(snapshot.locals.values().map(|l| l.schema_version));
        for version in versions {
            if version != SCHEMA_VERSION {
                return Err(SnapshotError::UnsupportedSchema(version));
            }
        }
        Ok(snapshot)
    }
}
