//! # Error Types
//!
//! All error types for the reward program.
//!
//! Only approve/reject crosses the ledger boundary; `RejectReason` exists for
//! logging, statistics and tests.

use crate::domain::value_objects::{Address, Amount, ProgramId, Timestamp};
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// REJECTION REASONS
// =============================================================================

/// Coarse rejection taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectCategory {
    /// Wrong argument count or undecodable argument.
    MalformedInput,
    /// Caller is not the owner on an owner-gated path.
    Unauthorized,
    /// Caller is not a registry member / ambassador.
    Ineligible,
    /// Time gate, opt-in status or pool balance not satisfied.
    PreconditionFailed,
    /// Transaction shape matched no dispatch route.
    Unrecognized,
    /// A post-transition invariant did not hold.
    Internal,
}

/// Why a transaction was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Creation carried the wrong number of arguments.
    #[error("wrong argument count: expected {expected}, got {actual}")]
    WrongArgumentCount {
        /// Required count.
        expected: usize,
        /// Count supplied.
        actual: usize,
    },

    /// A required argument was absent.
    #[error("missing argument at index {index}")]
    MissingArgument {
        /// Argument position.
        index: usize,
    },

    /// Argument does not fit in a 64-bit integer.
    #[error("argument {index} too long for an integer: {len} bytes")]
    ArgumentTooLong {
        /// Argument position.
        index: usize,
        /// Encoded length in bytes.
        len: usize,
    },

    /// Caller is not the program owner.
    #[error("caller {caller} is not the owner")]
    NotOwner {
        /// Transaction sender.
        caller: Address,
    },

    /// Caller is not in the role registry.
    #[error("caller {caller} is not a registry member")]
    NotRegistryMember {
        /// Transaction sender.
        caller: Address,
    },

    /// Caller's local state lacks the ambassador flag.
    #[error("caller {caller} is not an ambassador")]
    NotAmbassador {
        /// Transaction sender.
        caller: Address,
    },

    /// Creation attempted while the program already exists.
    #[error("program already exists")]
    ProgramAlreadyExists,

    /// Non-creation transaction before the program exists.
    #[error("program not found")]
    ProgramNotFound,

    /// Transaction targets a different program instance.
    #[error("wrong program: expected {expected}, got {actual}")]
    WrongProgram {
        /// Hosted program.
        expected: ProgramId,
        /// Program the transaction targets.
        actual: ProgramId,
    },

    /// Caller has no local state.
    #[error("caller {caller} has not opted in")]
    NotOptedIn {
        /// Transaction sender.
        caller: Address,
    },

    /// Caller already holds local state.
    #[error("caller {caller} already opted in")]
    AlreadyOptedIn {
        /// Transaction sender.
        caller: Address,
    },

    /// Claim submitted as something other than an application call.
    #[error("claim must be an application call")]
    NotApplicationCall,

    /// Claim before the approved pay date.
    #[error("pay date not reached: now {now} < {pay_date}")]
    PayDateNotReached {
        /// Ledger time of the claim.
        now: Timestamp,
        /// First permitted claim time.
        pay_date: Timestamp,
    },

    /// Repeat claim inside the cooldown period.
    #[error("cooldown active: now {now} < {available_at}")]
    CooldownActive {
        /// Ledger time of the claim.
        now: Timestamp,
        /// Earliest time a repeat claim is accepted.
        available_at: Timestamp,
    },

    /// Claim not strictly after the previous payment.
    #[error("claim at {now} not after last payment at {pay_time}")]
    NotAfterLastPayment {
        /// Ledger time of the claim.
        now: Timestamp,
        /// Time of the previous payment.
        pay_time: Timestamp,
    },

    /// Claim would drive the bonus pool negative.
    #[error("insufficient bonus pool: requested {requested}, available {available}")]
    InsufficientPool {
        /// Claimed amount.
        requested: Amount,
        /// Current bonus pool.
        available: Amount,
    },

    /// Closeout reservation exceeds the total supply.
    #[error("reservation {reservation} exceeds total supply {supply}")]
    ReservationExceedsSupply {
        /// Recorded total supply.
        supply: Amount,
        /// Configured bonus pool reservation.
        reservation: Amount,
    },

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// No dispatch route matched.
    #[error("unrecognized transaction")]
    UnrecognizedTransaction,

    /// Post-transition invariant failed.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl RejectReason {
    /// Map a reason onto the rejection taxonomy.
    #[must_use]
    pub fn category(&self) -> RejectCategory {
        match self {
            Self::WrongArgumentCount { .. }
            | Self::MissingArgument { .. }
            | Self::ArgumentTooLong { .. } => RejectCategory::MalformedInput,
            Self::NotOwner { .. } => RejectCategory::Unauthorized,
            Self::NotRegistryMember { .. } | Self::NotAmbassador { .. } => {
                RejectCategory::Ineligible
            }
            Self::UnrecognizedTransaction => RejectCategory::Unrecognized,
            Self::InvariantViolation(_) => RejectCategory::Internal,
            _ => RejectCategory::PreconditionFailed,
        }
    }
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// Errors from the state store port.
///
/// The in-memory store never fails; fallible host adapters surface their
/// decoding failures here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Stored state could not be decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Errors decoding the flat key/value layout or a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Required key absent.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// Key present with the wrong value type.
    #[error("type mismatch for key {key}: expected {expected}")]
    TypeMismatch {
        /// Offending key.
        key: String,
        /// Value type the key requires.
        expected: &'static str,
    },

    /// Key not part of the schema.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// Schema version not understood.
    #[error("unsupported schema version: {0}")]
    UnsupportedSchema(u64),

    /// Stored registry failed validation.
    #[error("invalid registry: {0}")]
    InvalidRegistry(#[from] ConfigError),

    /// JSON encoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Registry has the wrong number of members.
    #[error("registry must hold exactly {expected} identities, got {actual}")]
    RegistrySize {
        /// Required registry size.
        expected: usize,
        /// Identities supplied.
        actual: usize,
    },

    /// Registry lists the same identity twice.
    #[error("duplicate registry identity: {0}")]
    DuplicateMember(Address),

    /// Reservation larger than the configured asset balance.
    #[error("bonus pool reservation {reservation} exceeds asset balance {balance}")]
    ReservationTooLarge {
        /// Configured bonus pool reservation.
        reservation: Amount,
        /// Configured asset balance.
        balance: Amount,
    },

    /// Config file unreadable.
    #[error("failed to read config: {0}")]
    Io(String),

    /// Config file not valid JSON for the schema.
    #[error("failed to parse config: {0}")]
    Parse(String),
}
