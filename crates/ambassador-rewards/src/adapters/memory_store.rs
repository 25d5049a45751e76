//! # In-Memory State Store
//!
//! Host emulation of the ledger's global and local scopes. Used by the
//! runtime binary and by tests.

use crate::domain::entities::{GlobalState, LocalState, StateDelta};
use crate::domain::kv::StateSnapshot;
use crate::domain::value_objects::Address;
use crate::errors::StateError;
use crate::ports::outbound::StateStore;
use parking_lot::RwLock;

/// Thread-safe in-memory store. A delta is applied under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    inner: RwLock<StateSnapshot>,
}

impl InMemoryStateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: StateSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Number of accounts with local state.
    #[must_use]
    pub fn local_count(&self) -> usize {
        self.inner.read().locals.len()
    }
}

impl StateStore for InMemoryStateStore {
    fn global(&self) -> Result<Option<GlobalState>, StateError> {
        Ok(self.inner.read().global.clone())
    }

    fn local(&self, account: &Address) -> Result<Option<LocalState>, StateError> {
        Ok(self.inner.read().locals.get(account).cloned())
    }

    fn apply(&self, delta: StateDelta) -> Result<(), StateError> {
        let mut state = self.inner.write();
        if let Some(global) = delta.global {
            state.global = Some(global);
        }
        if let Some((account, local)) = delta.local {
            state.locals.insert(account, local);
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<StateSnapshot, StateError> {
        Ok(self.inner.read().clone())
    }

    fn restore(&self, snapshot: StateSnapshot) -> Result<(), StateError> {
        *self.inner.write() = snapshot;
        Ok(())
    }
}
