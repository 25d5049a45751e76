//! # Lifecycle Controller
//!
//! Creation, owner-gated update and delete, and closeout.

use super::{HandlerInput, HandlerResult};
use crate::domain::entities::{GlobalState, StateDelta};
use crate::domain::value_objects::constants::SCHEMA_VERSION;
use crate::errors::RejectReason;

/// Initialize global state for a new program.
///
/// Rejects when the program already exists or the argument count is not
/// the configured one. Arguments are otherwise opaque.
pub fn create(input: &HandlerInput<'_>) -> HandlerResult {
    if input.global.is_some() {
        return Err(RejectReason::ProgramAlreadyExists);
    }

    let expected = input.config.required_creation_args;
    let actual = input.tx.args.len();
    if actual != expected {
        return Err(RejectReason::WrongArgumentCount { expected, actual });
    }

    let approved_pay_date = input
        .now()
        .checked_add(input.config.pay_date_offset_secs)
        .ok_or(RejectReason::Overflow("approved_pay_date"))?;

    let global = GlobalState {
        schema_version: SCHEMA_VERSION,
        owner: input.tx.sender,
        registry: input.config.registry.clone(),
        approved_pay_date,
        reward_per_head: input.config.reward_per_head,
        total_supply: input.config.asset_balance,
        reserve: 0,
        approved_bonus_pool: 0,
    };

    Ok(StateDelta {
        global: Some(global),
        local: None,
    })
}

/// Approve a code update iff the caller is the owner.
pub fn update(input: &HandlerInput<'_>) -> HandlerResult {
    require_owner(input)?;
    Ok(StateDelta::none())
}

/// Approve deletion iff the caller is the owner.
///
/// Storage erasure is left to the host.
pub fn delete(input: &HandlerInput<'_>) -> HandlerResult {
    require_owner(input)?;
    Ok(StateDelta::none())
}

fn require_owner(input: &HandlerInput<'_>) -> Result<(), RejectReason> {
    let global = input.require_global()?;
    if input.tx.sender == global.owner {
        Ok(())
    } else {
        Err(RejectReason::NotOwner {
            caller: input.tx.sender,
        })
    }
}

/// Reserve the bonus pool and flag the closing account.
///
/// Not owner-gated. The caller must hold local state.
pub fn close_out(input: &HandlerInput<'_>) -> HandlerResult {
    let global = input.require_global()?;
    let local = input.require_local()?;

    let reservation = input.config.bonus_pool_reservation;
    let reserve = global
        .total_supply
        .checked_sub(reservation)
        .ok_or(RejectReason::ReservationExceedsSupply {
            supply: global.total_supply,
            reservation,
        })?;

    let mut next_global = global.clone();
    next_global.approved_bonus_pool = reservation;
    next_global.reserve = reserve;

    let mut next_local = local.clone();
    next_local.authorization_account = true;

    Ok(StateDelta {
        global: Some(next_global),
        local: Some((input.tx.sender, next_local)),
    })
}
