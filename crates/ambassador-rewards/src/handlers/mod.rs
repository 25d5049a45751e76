//! # Transaction Handlers
//!
//! One module per component of the program. Every handler is a pure function
//! from a [`HandlerInput`] to either the writes to commit or a rejection.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `Create`, `Update`, `Delete`, `CloseOut` | [`lifecycle`] |
//! | `OptIn` | [`registration`] |
//! | `ClaimReward` | [`claim`] then [`transfer`] |
//!
//! [`dispatcher`] selects the route.

pub mod claim;
pub mod dispatcher;
pub mod lifecycle;
pub mod registration;
pub mod transfer;

pub use dispatcher::{dispatch, route_for};

use crate::config::ProgramConfig;
use crate::domain::entities::{GlobalState, LedgerContext, LocalState, StateDelta, Transaction};
use crate::domain::value_objects::ProgramId;
use crate::errors::RejectReason;

/// Result of a single handler.
pub type HandlerResult = Result<StateDelta, RejectReason>;

/// Everything a handler may read: the transaction, the host context and the
/// committed state it is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct HandlerInput<'a> {
    /// Transaction under evaluation.
    pub tx: &'a Transaction,
    /// Host-supplied ledger context.
    pub ctx: &'a LedgerContext,
    /// Load-time configuration.
    pub config: &'a ProgramConfig,
    /// Id of the hosted program instance.
    pub program: ProgramId,
    /// Committed global state, absent before creation.
    pub global: Option<&'a GlobalState>,
    /// Committed local state of account index 0 (the sender).
    pub local: Option<&'a LocalState>,
}

impl<'a> HandlerInput<'a> {
    /// Global state, or `ProgramNotFound`.
    pub fn require_global(&self) -> Result<&'a GlobalState, RejectReason> {
        self.global.ok_or(RejectReason::ProgramNotFound)
    }

    /// Sender's local state, or `NotOptedIn`.
    pub fn require_local(&self) -> Result<&'a LocalState, RejectReason> {
        self.local.ok_or(RejectReason::NotOptedIn {
            caller: self.tx.sender,
        })
    }

    /// Current host time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.ctx.latest_timestamp
    }
}
