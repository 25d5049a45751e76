//! # Driven Port (SPI - Outbound)
//!
//! Storage the program depends on. The host ledger owns persistence; this
//! trait is the narrow view the core needs of it.

use crate::domain::entities::{GlobalState, LocalState, StateDelta};
use crate::domain::kv::StateSnapshot;
use crate::domain::value_objects::Address;
use crate::errors::StateError;

/// Typed global and per-account state storage.
pub trait StateStore: Send + Sync {
    /// Global state, `None` before creation.
    fn global(&self) -> Result<Option<GlobalState>, StateError>;

    /// Local state of `account`, `None` if it never opted in.
    fn local(&self, account: &Address) -> Result<Option<LocalState>, StateError>;

    /// Commit every entry of `delta` or none of them.
    fn apply(&self, delta: StateDelta) -> Result<(), StateError>;

    /// Copy of every scope.
    fn snapshot(&self) -> Result<StateSnapshot, StateError>;

    /// Replace every scope with `snapshot`.
    fn restore(&self, snapshot: StateSnapshot) -> Result<(), StateError>;
}
