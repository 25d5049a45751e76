//! # Reward Program Service
//!
//! Binds the dispatcher to a [`StateStore`]: load committed state, dispatch,
//! check invariants, commit.
//!
//! Transactions are serialized through a commit lock, so each one is
//! evaluated against the state left by the previous one.

use crate::config::ProgramConfig;
use crate::domain::entities::{Decision, LedgerContext, Transaction};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult, PreState};
use crate::domain::kv::StateSnapshot;
use crate::domain::value_objects::ProgramId;
use crate::errors::{RejectCategory, RejectReason, StateError};
use crate::handlers::{dispatch, HandlerInput};
use crate::ports::inbound::RewardProgramApi;
use crate::ports::outbound::StateStore;

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Id of the hosted program instance.
    pub program_id: ProgramId,
    /// Run post-transition invariant checks before committing.
    pub check_invariants: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            program_id: ProgramId(1),
            check_invariants: true,
        }
    }
}

/// Processing statistics.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Total transactions processed.
    pub processed: u64,
    /// Approved transactions.
    pub approved: u64,
    /// Rejected transactions.
    pub rejected: u64,
    /// Rejections by category.
    pub rejected_by_category: HashMap<RejectCategory, u64>,
}

impl ServiceStats {
    /// Rejections in `category`.
    #[must_use]
    pub fn rejections(&self, category: RejectCategory) -> u64 {
        self.rejected_by_category
            .get(&category)
            .copied()
            .unwrap_or(0)
    }

    fn record(&mut self, decision: &Decision) {
        self.processed += 1;
        match decision.category() {
            None => self.approved += 1,
            Some(category) => {
                self.rejected += 1;
                *self.rejected_by_category.entry(category).or_insert(0) += 1;
            }
        }
    }
}

/// The reward program, hosted on a state store.
pub struct RewardProgramService<S: StateStore> {
    config: ServiceConfig,
    program: ProgramConfig,
    store: S,
    commit_lock: Mutex<()>,
    stats: RwLock<ServiceStats>,
}

impl<S: StateStore> RewardProgramService<S> {
    /// Create a service over `store`.
    pub fn new(store: S, program: ProgramConfig, config: ServiceConfig) -> Self {
        Self {
            config,
            program,
            store,
            commit_lock: Mutex::new(()),
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Current statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Program configuration in use.
    pub fn program_config(&self) -> &ProgramConfig {
        &self.program
    }

    fn evaluate(&self, tx: &Transaction, ctx: &LedgerContext) -> Result<Decision, StateError> {
        let global = self.store.global()?;
        let local = self.store.local(&tx.sender)?;

        let input = HandlerInput {
            tx,
            ctx,
            config: &self.program,
            program: self.config.program_id,
            global: global.as_ref(),
            local: local.as_ref(),
        };
        let decision = dispatch(&input);

        if !self.config.check_invariants {
            return Ok(decision);
        }

        let pre = PreState {
            global: global.as_ref(),
            local: local.as_ref(),
        };
        match check_all_invariants(pre, &decision) {
            InvariantCheckResult::Valid => Ok(decision),
            InvariantCheckResult::Invalid(violations) => {
                let summary = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                error!(
                    route = ?decision.route,
                    violations = %summary,
                    "invariant violation, delta discarded"
                );
                Ok(Decision::reject(
                    decision.route,
                    RejectReason::InvariantViolation(summary),
                ))
            }
        }
    }
}

impl<S: StateStore> RewardProgramApi for RewardProgramService<S> {
    #[instrument(
        skip(self, tx, ctx),
        fields(sender = %tx.sender, round = ctx.round, now = ctx.latest_timestamp)
    )]
    fn process(&self, tx: &Transaction, ctx: &LedgerContext) -> Result<Decision, StateError> {
        let _guard = self.commit_lock.lock();

        let decision = self.evaluate(tx, ctx)?;

        if decision.approved {
            self.store.apply(decision.delta.clone())?;
            info!(route = ?decision.route, "transaction approved");
        } else if let Some(reason) = &decision.reason {
            warn!(
                route = ?decision.route,
                category = ?reason.category(),
                reason = %reason,
                "transaction rejected"
            );
        }

        self.stats.write().record(&decision);
        Ok(decision)
    }

    fn snapshot(&self) -> Result<StateSnapshot, StateError> {
        self.store.snapshot()
    }
}
