//! # Core Domain Entities
//!
//! Typed program state, the transaction shape the host hands us, and the
//! decision we hand back.

use super::registry::RoleRegistry;
use super::value_objects::{constants::SCHEMA_VERSION, Address, Amount, Bytes, ProgramId, Timestamp};
use crate::errors::{RejectCategory, RejectReason};
use serde::{Deserialize, Serialize};

// =============================================================================
// PROGRAM STATE
// =============================================================================

/// Global state, one instance per program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Persisted layout version.
    pub schema_version: u64,
    /// Account authorized for update and delete.
    pub owner: Address,
    /// Eligible participants.
    pub registry: RoleRegistry,
    /// Earliest allowed claim time.
    pub approved_pay_date: Timestamp,
    /// Nominal per-claim reward.
    pub reward_per_head: Amount,
    /// Asset balance backing the program.
    pub total_supply: Amount,
    /// `total_supply - approved_bonus_pool`, set at closeout.
    pub reserve: Amount,
    /// Amount still available for claims.
    pub approved_bonus_pool: Amount,
}

/// Local state, one instance per opted-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalState {
    /// Persisted layout version.
    pub schema_version: u64,
    /// Cumulative amount credited.
    pub balance: Amount,
    /// Presence flag, 1 after opt-in.
    pub opted_count: u64,
    /// Must be set to claim.
    pub is_ambassador: bool,
    /// Successful claims so far.
    pub pay_count: u64,
    /// Time of the last successful claim.
    pub pay_time: Timestamp,
    /// Set when the account closed out.
    pub authorization_account: bool,
}

impl LocalState {
    /// Fresh local state for an admitted ambassador.
    #[must_use]
    pub fn registered() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            balance: 0,
            opted_count: 1,
            is_ambassador: true,
            pay_count: 0,
            pay_time: 0,
            authorization_account: false,
        }
    }

    /// True once at least one claim has been paid.
    #[must_use]
    pub fn is_repeat_claimant(&self) -> bool {
        self.pay_count > 0
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Declared completion action of an application call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnCompletion {
    /// Plain call.
    #[default]
    NoOp,
    /// Register local state.
    OptIn,
    /// Leave the program.
    CloseOut,
    /// Replace program code.
    UpdateApplication,
    /// Remove the program.
    DeleteApplication,
}

/// Host transaction type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxnType {
    /// Raw value transfer.
    Payment,
    /// Asset transfer.
    AssetTransfer,
    /// Application invocation.
    #[default]
    ApplicationCall,
}

/// Custom call marker carried in the transaction note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallMarker {
    /// Claim the per-head reward.
    ClaimReward,
}

/// Which program instance a transaction targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramTarget {
    /// Deploy a new instance.
    Create,
    /// Call an existing instance.
    Existing(ProgramId),
}

/// A transaction as presented by the host after signature checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signer.
    pub sender: Address,
    /// Host transaction type.
    #[serde(default)]
    pub txn_type: TxnType,
    /// Target program.
    pub target: ProgramTarget,
    /// Declared completion action.
    #[serde(default)]
    pub on_completion: OnCompletion,
    /// Optional custom marker.
    #[serde(default)]
    pub marker: Option<CallMarker>,
    /// Opaque arguments; argument 0 is the claim amount.
    #[serde(default)]
    pub args: Vec<Bytes>,
    /// Extra referenced accounts. Index 0 of the host's account list is always
    /// the sender, so these start at index 1.
    #[serde(default)]
    pub accounts: Vec<Address>,
}

impl Transaction {
    /// Account at host index `index` (0 is the sender).
    #[must_use]
    pub fn account(&self, index: usize) -> Option<Address> {
        match index {
            0 => Some(self.sender),
            i => self.accounts.get(i - 1).copied(),
        }
    }

    /// Builder: creation call with `args`.
    #[must_use]
    pub fn create(sender: Address, args: Vec<Bytes>) -> Self {
        Self {
            sender,
            txn_type: TxnType::ApplicationCall,
            target: ProgramTarget::Create,
            on_completion: OnCompletion::NoOp,
            marker: None,
            args,
            accounts: Vec::new(),
        }
    }

    /// Builder: call to `program` with the given completion action.
    #[must_use]
    pub fn call(sender: Address, program: ProgramId, on_completion: OnCompletion) -> Self {
        Self {
            sender,
            txn_type: TxnType::ApplicationCall,
            target: ProgramTarget::Existing(program),
            on_completion,
            marker: None,
            args: Vec::new(),
            accounts: Vec::new(),
        }
    }

    /// Builder: reward claim of `amount`.
    #[must_use]
    pub fn claim(sender: Address, program: ProgramId, amount: Amount) -> Self {
        let mut tx = Self::call(sender, program, OnCompletion::NoOp);
        tx.marker = Some(CallMarker::ClaimReward);
        tx.args = vec![Bytes::from_u64(amount)];
        tx
    }
}

/// Ledger context supplied by the host for the current transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerContext {
    /// Round the transaction is evaluated in.
    pub round: u64,
    /// Latest committed block timestamp.
    pub latest_timestamp: Timestamp,
}

impl LedgerContext {
    /// Context at `timestamp` in round 0.
    #[must_use]
    pub fn at(latest_timestamp: Timestamp) -> Self {
        Self {
            round: 0,
            latest_timestamp,
        }
    }
}

// =============================================================================
// DECISIONS
// =============================================================================

/// Handler selected by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Program creation.
    Create,
    /// Owner-gated update.
    Update,
    /// Owner-gated delete.
    Delete,
    /// Closeout.
    CloseOut,
    /// Registration.
    OptIn,
    /// Claim validation and transfer.
    ClaimReward,
}

/// State writes an approved transaction asks the host to commit.
///
/// Each present entry replaces the stored value wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateDelta {
    /// New global state.
    pub global: Option<GlobalState>,
    /// New local state for one account.
    pub local: Option<(Address, LocalState)>,
}

impl StateDelta {
    /// No writes.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// True if nothing is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.local.is_none()
    }
}

/// Outcome of evaluating one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Route taken, if any matched.
    pub route: Option<Route>,
    /// Approve (true) or reject (false).
    pub approved: bool,
    /// Why it was rejected.
    pub reason: Option<RejectReason>,
    /// Writes to commit; empty on rejection.
    pub delta: StateDelta,
}

impl Decision {
    /// Approve with `delta`.
    #[must_use]
    pub fn approve(route: Route, delta: StateDelta) -> Self {
        Self {
            route: Some(route),
            approved: true,
            reason: None,
            delta,
        }
    }

    /// Reject; never carries writes.
    #[must_use]
    pub fn reject(route: Option<Route>, reason: RejectReason) -> Self {
        Self {
            route,
            approved: false,
            reason: Some(reason),
            delta: StateDelta::none(),
        }
    }

    /// The single value that crosses the ledger boundary: 1 or 0.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        u64::from(self.approved)
    }

    /// Rejection category, if rejected.
    #[must_use]
    pub fn category(&self) -> Option<RejectCategory> {
        self.reason.as_ref().map(RejectReason::category)
    }
}
