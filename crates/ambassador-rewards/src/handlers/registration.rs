//! # Registration Handler
//!
//! Opt-in admits registry members only and initializes their local state.

use super::{HandlerInput, HandlerResult};
use crate::domain::entities::{GlobalState, LocalState, StateDelta};
use crate::domain::value_objects::Address;
use crate::errors::RejectReason;

/// Membership test shared with the claim validator. Touches no state.
pub fn require_member(global: &GlobalState, caller: &Address) -> Result<(), RejectReason> {
    if global.registry.contains(caller) {
        Ok(())
    } else {
        Err(RejectReason::NotRegistryMember { caller: *caller })
    }
}

/// Handle an opt-in.
pub fn opt_in(input: &HandlerInput<'_>) -> HandlerResult {
    let global = input.require_global()?;
    let caller = input.tx.sender;

    if input.local.is_some() {
        return Err(RejectReason::AlreadyOptedIn { caller });
    }
    require_member(global, &caller)?;

    Ok(StateDelta {
        global: None,
        local: Some((caller, LocalState::registered())),
    })
}
