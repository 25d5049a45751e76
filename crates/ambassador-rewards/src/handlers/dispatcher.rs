//! # Dispatcher
//!
//! Priority-ordered, first-match routing table. A transaction matching no
//! entry is rejected; there is no fallthrough handler.

use super::{claim, lifecycle, registration, HandlerInput, HandlerResult};
use crate::domain::entities::{
    CallMarker, Decision, OnCompletion, ProgramTarget, Route, Transaction,
};
use crate::errors::RejectReason;
use tracing::debug;

type Predicate = fn(&Transaction) -> bool;

/// Routing table in priority order.
const ROUTES: [(Predicate, Route); 6] = [
    (|tx: &Transaction| tx.target == ProgramTarget::Create, Route::Create),
    (
        |tx: &Transaction| tx.on_completion == OnCompletion::UpdateApplication,
        Route::Update,
    ),
    (
        |tx: &Transaction| tx.on_completion == OnCompletion::DeleteApplication,
        Route::Delete,
    ),
    (
        |tx: &Transaction| tx.on_completion == OnCompletion::CloseOut,
        Route::CloseOut,
    ),
    (|tx: &Transaction| tx.on_completion == OnCompletion::OptIn, Route::OptIn),
    (
        |tx: &Transaction| tx.marker == Some(CallMarker::ClaimReward),
        Route::ClaimReward,
    ),
];

/// First route whose predicate matches `tx`.
#[must_use]
pub fn route_for(tx: &Transaction) -> Option<Route> {
    ROUTES
        .iter()
        .find(|(matches, _)| matches(tx))
        .map(|(_, route)| *route)
}

/// Route and evaluate one transaction against committed state.
#[must_use]
pub fn dispatch(input: &HandlerInput<'_>) -> Decision {
    let Some(route) = route_for(input.tx) else {
        debug!(sender = %input.tx.sender, "no route matched");
        return Decision::reject(None, RejectReason::UnrecognizedTransaction);
    };
    debug!(?route, sender = %input.tx.sender, "routed");

    match check_target(input).and_then(|()| run(route, input)) {
        Ok(delta) => Decision::approve(route, delta),
        Err(reason) => Decision::reject(Some(route), reason),
    }
}

/// Non-creation calls must address the hosted, existing program.
fn check_target(input: &HandlerInput<'_>) -> Result<(), RejectReason> {
    match input.tx.target {
        ProgramTarget::Create => Ok(()),
        ProgramTarget::Existing(actual) if actual != input.program => {
            Err(RejectReason::WrongProgram {
                expected: input.program,
                actual,
            })
        }
        ProgramTarget::Existing(_) => input.require_global().map(|_| ()),
    }
}

fn run(route: Route, input: &HandlerInput<'_>) -> HandlerResult {
    match route {
        Route::Create => lifecycle::create(input),
        Route::Update => lifecycle::update(input),
        Route::Delete => lifecycle::delete(input),
        Route::CloseOut => lifecycle::close_out(input),
        Route::OptIn => registration::opt_in(input),
        Route::ClaimReward => claim::claim_reward(input),
    }
}
