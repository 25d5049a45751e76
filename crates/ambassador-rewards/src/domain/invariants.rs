//! # Domain Invariants
//!
//! Properties that MUST hold across every approved transition. The service
//! runs these after dispatch and refuses to commit a delta that breaks one.

use super::entities::{Decision, GlobalState, LocalState, Route};
use super::value_objects::Address;

/// Closeout leaves `reserve + approved_bonus_pool == total_supply`.
#[must_use]
pub fn check_reserve_split(global: &GlobalState) -> bool {
    global
        .reserve
        .checked_add(global.approved_bonus_pool)
        .is_some_and(|sum| sum == global.total_supply)
}

/// `pay_count` never decreases.
#[must_use]
pub fn check_pay_count_monotonic(pre: Option<&LocalState>, post: &LocalState) -> bool {
    pre.map_or(true, |pre| post.pay_count >= pre.pay_count)
}

/// Only registry members may hold the ambassador flag.
#[must_use]
pub fn check_ambassador_membership(global: &GlobalState, account: &Address, post: &LocalState) -> bool {
    !post.is_ambassador || global.registry.contains(account)
}

/// The pool is debited by exactly what the claimant is credited.
#[must_use]
pub fn check_pool_conservation(
    pre_global: &GlobalState,
    post_global: &GlobalState,
    pre_local: &LocalState,
    post_local: &LocalState,
) -> bool {
    let debited = pre_global
        .approved_bonus_pool
        .checked_sub(post_global.approved_bonus_pool);
    let credited = post_local.balance.checked_sub(pre_local.balance);
    matches!((debited, credited), (Some(d), Some(c)) if d == c)
}

/// Rejections carry no writes.
#[must_use]
pub fn check_rejection_is_pure(decision: &Decision) -> bool {
    decision.approved || decision.delta.is_empty()
}

/// Pre-transition state handed to [`check_all_invariants`].
#[derive(Clone, Copy, Debug)]
pub struct PreState<'a> {
    /// Global state before the transaction.
    pub global: Option<&'a GlobalState>,
    /// Sender's local state before the transaction.
    pub local: Option<&'a LocalState>,
}

/// Check all invariants relevant to `decision`.
#[must_use]
pub fn check_all_invariants(pre: PreState<'_>, decision: &Decision) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_rejection_is_pure(decision) {
        violations.push(InvariantViolation::RejectionWithWrites);
    }

    let post_global = decision.delta.global.as_ref().or(pre.global);

    if let Some((account, post_local)) = &decision.delta.local {
        if !check_pay_count_monotonic(pre.local, post_local) {
            violations.push(InvariantViolation::PayCountDecreased);
        }
        if let Some(global) = post_global {
            if !check_ambassador_membership(global, account, post_local) {
                violations.push(InvariantViolation::AmbassadorNotInRegistry(*account));
            }
        }
    }

    match decision.route {
        Some(Route::CloseOut) if decision.approved => {
            if let Some(global) = &decision.delta.global {
                if !check_reserve_split(global) {
                    violations.push(InvariantViolation::ReserveSplitBroken {
                        reserve: global.reserve,
                        pool: global.approved_bonus_pool,
                        supply: global.total_supply,
                    });
                }
            }
        }
        Some(Route::ClaimReward) if decision.approved => {
            let conserved = match (
                pre.global,
                &decision.delta.global,
                pre.local,
                &decision.delta.local,
            ) {
                (Some(g0), Some(g1), Some(l0), Some((_, l1))) => {
                    check_pool_conservation(g0, g1, l0, l1)
                }
                _ => false,
            };
            if !conserved {
                violations.push(InvariantViolation::PoolNotConserved);
            }
        }
        _ => {}
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A rejected decision carried writes.
    RejectionWithWrites,
    /// `pay_count` went down.
    PayCountDecreased,
    /// Ambassador flag on a non-member.
    AmbassadorNotInRegistry(Address),
    /// `reserve + pool != total_supply` after closeout.
    ReserveSplitBroken {
        /// Reserve after the transition.
        reserve: u64,
        /// Bonus pool after the transition.
        pool: u64,
        /// Recorded total supply.
        supply: u64,
    },
    /// Pool debit and balance credit differ.
    PoolNotConserved,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RejectionWithWrites => write!(f, "rejected decision carries writes"),
            Self::PayCountDecreased => write!(f, "pay_count decreased"),
            Self::AmbassadorNotInRegistry(addr) => {
                write!(f, "ambassador flag set for non-member {addr}")
            }
            Self::ReserveSplitBroken {
                reserve,
                pool,
                supply,
            } => write!(f, "reserve {reserve} + pool {pool} != supply {supply}"),
            Self::PoolNotConserved => write!(f, "pool debit differs from balance credit"),
        }
    }
}
