//! # Claim Validator
//!
//! Ordered preconditions of a reward claim. The first failing check decides
//! the rejection reason:
//!
//! 1. application-call transaction
//! 2. `now >= approved_pay_date`
//! 3. caller opted in (`pay_count` decides first vs repeat claim)
//! 4. caller is a registry member
//! 5. repeat claim: `now >= approved_pay_date + cooldown`
//! 6. `now > pay_time`
//!
//! Argument 0 is then decoded as the claimed amount.

use super::registration::require_member;
use super::{transfer, HandlerInput, HandlerResult};
use crate::domain::entities::{GlobalState, LocalState, TxnType};
use crate::domain::value_objects::Amount;
use crate::errors::RejectReason;

/// A claim that passed every precondition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedClaim<'a> {
    /// Global state the claim was validated against.
    pub global: &'a GlobalState,
    /// Caller's local state.
    pub local: &'a LocalState,
    /// Decoded claim amount.
    pub amount: Amount,
}

/// Run every claim precondition.
pub fn validate<'a>(input: &HandlerInput<'a>) -> Result<ValidatedClaim<'a>, RejectReason> {
    let global = input.require_global()?;
    let now = input.now();

    if input.tx.txn_type != TxnType::ApplicationCall {
        return Err(RejectReason::NotApplicationCall);
    }

    if now < global.approved_pay_date {
        return Err(RejectReason::PayDateNotReached {
            now,
            pay_date: global.approved_pay_date,
        });
    }

    let local = input.require_local()?;

    require_member(global, &input.tx.sender)?;

    if local.is_repeat_claimant() {
        let available_at = global
            .approved_pay_date
            .checked_add(input.config.cooldown_secs)
            .ok_or(RejectReason::Overflow("cooldown"))?;
        if now < available_at {
            return Err(RejectReason::CooldownActive { now, available_at });
        }
    }

    if now <= local.pay_time {
        return Err(RejectReason::NotAfterLastPayment {
            now,
            pay_time: local.pay_time,
        });
    }

    let amount = decode_amount(input)?;

    Ok(ValidatedClaim {
        global,
        local,
        amount,
    })
}

/// Decode argument 0 as a big-endian integer of at most 8 bytes.
fn decode_amount(input: &HandlerInput<'_>) -> Result<Amount, RejectReason> {
    let arg = input
        .tx
        .args
        .first()
        .ok_or(RejectReason::MissingArgument { index: 0 })?;
    arg.to_u64().ok_or(RejectReason::ArgumentTooLong {
        index: 0,
        len: arg.len(),
    })
}

/// Validate, then hand over to the transfer effector.
pub fn claim_reward(input: &HandlerInput<'_>) -> HandlerResult {
    let claim = validate(input)?;
    transfer::pay(input, &claim)
}
