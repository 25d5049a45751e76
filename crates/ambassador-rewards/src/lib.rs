//! # Ambassador Rewards - Role-Restricted Reward Program
//!
//! Transaction-triggered validator and state mutator for a reward program
//! hosted on an append-only ledger. For every transaction the core decides
//! approve or reject and, when approving, the state writes the host commits
//! atomically.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Global state created exactly once | `handlers/lifecycle.rs` - `create()` |
//! | `reserve + pool == total_supply` after closeout | `domain/invariants.rs` - `check_reserve_split()` |
//! | Only registry members hold the ambassador flag | `domain/invariants.rs` - `check_ambassador_membership()` |
//! | `pay_count` never decreases | `domain/invariants.rs` - `check_pay_count_monotonic()` |
//! | Pool debit equals balance credit | `domain/invariants.rs` - `check_pool_conservation()` |
//! | Rejections write nothing | `domain/invariants.rs` - `check_rejection_is_pure()` |
//!
//! ## Dispatch Order
//!
//! | Priority | Predicate | Route |
//! |----------|-----------|-------|
//! | 1 | targets a new program | `Create` |
//! | 2 | `on_completion == UpdateApplication` | `Update` (owner only) |
//! | 3 | `on_completion == DeleteApplication` | `Delete` (owner only) |
//! | 4 | `on_completion == CloseOut` | `CloseOut` |
//! | 5 | `on_completion == OptIn` | `OptIn` (registry members only) |
//! | 6 | claim marker present | `ClaimReward` |
//!
//! Anything else is rejected.
//!
//! ## Reference Parameters
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | Pay date offset / cooldown | 2,419,200 s (28 days) |
//! | `reward_per_head` | 5,000 |
//! | Asset balance (`total_supply`) | 700,000 |
//! | Bonus pool reservation | 500,000 |
//! | Registry size | 5 |
//!
//! ## Usage Example
//!
//! ```
//! use ambassador_rewards::prelude::*;
//!
//! let service = RewardProgramService::new(
//!     InMemoryStateStore::new(),
//!     ProgramConfig::default(),
//!     ServiceConfig::default(),
//! );
//!
//! let owner = Address::new([0xAA; 32]);
//! let args = (0..5).map(Bytes::from_u64).collect();
//! let decision = service
//!     .process(&Transaction::create(owner, args), &LedgerContext::at(1_000))
//!     .unwrap();
//! assert_eq!(decision.as_u64(), 1);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        CallMarker, Decision, GlobalState, LedgerContext, LocalState, OnCompletion,
        ProgramTarget, Route, StateDelta, Transaction, TxnType,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, Amount, Bytes, ProgramId, Timestamp};

    // Registry and persisted layout
    pub use crate::domain::kv::{KvMap, KvSnapshot, StateSnapshot, StoredValue};
    pub use crate::domain::registry::RoleRegistry;

    // Configuration
    pub use crate::config::ProgramConfig;

    // Errors
    pub use crate::errors::{
        ConfigError, RejectCategory, RejectReason, SnapshotError, StateError,
    };

    // Ports
    pub use crate::ports::inbound::RewardProgramApi;
    pub use crate::ports::outbound::StateStore;

    // Adapters
    pub use crate::adapters::InMemoryStateStore;

    // Service
    pub use crate::service::{RewardProgramService, ServiceConfig, ServiceStats};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
