//! # Transfer Effector
//!
//! Applies a validated claim: pool debit, balance credit, counters.
//! All-or-nothing; any failure rejects with no writes.

use super::claim::ValidatedClaim;
use super::{HandlerInput, HandlerResult};
use crate::domain::entities::StateDelta;
use crate::errors::RejectReason;

/// Pay out `claim`.
pub fn pay(input: &HandlerInput<'_>, claim: &ValidatedClaim<'_>) -> HandlerResult {
    let caller = input.tx.sender;

    if !claim.local.is_ambassador {
        return Err(RejectReason::NotAmbassador { caller });
    }

    let pool = claim
        .global
        .approved_bonus_pool
        .checked_sub(claim.amount)
        .ok_or(RejectReason::InsufficientPool {
            requested: claim.amount,
            available: claim.global.approved_bonus_pool,
        })?;

    let mut local = claim.local.clone();
    local.balance = local
        .balance
        .checked_add(claim.amount)
        .ok_or(RejectReason::Overflow("balance"))?;
    local.pay_count = local
        .pay_count
        .checked_add(1)
        .ok_or(RejectReason::Overflow("pay_count"))?;
    local.pay_time = input.now();

    let mut global = claim.global.clone();
    global.approved_bonus_pool = pool;

    Ok(StateDelta {
        global: Some(global),
        local: Some((caller, local)),
    })
}
