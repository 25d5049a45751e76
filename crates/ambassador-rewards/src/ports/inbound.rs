//! # Driving Port (API - Inbound)
//!
//! The interface a host uses to submit transactions to the program.

use crate::domain::entities::{Decision, LedgerContext, Transaction};
use crate::domain::kv::StateSnapshot;
use crate::errors::StateError;

/// Transaction evaluation API.
///
/// Implementations process one transaction at a time to completion and
/// commit approved writes atomically.
pub trait RewardProgramApi: Send + Sync {
    /// Evaluate `tx` against committed state and commit it if approved.
    ///
    /// # Returns
    ///
    /// * `Ok(Decision)` - approve or reject, with the reason for a rejection
    /// * `Err(StateError)` - the store could not be read or written
    fn process(&self, tx: &Transaction, ctx: &LedgerContext) -> Result<Decision, StateError>;

    /// Typed image of the committed state.
    fn snapshot(&self) -> Result<StateSnapshot, StateError>;
}
