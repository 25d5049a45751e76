//! Line-oriented transaction replay.

use ambassador_rewards::prelude::*;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::debug;

/// One input line: a transaction and the ledger context it executes in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayInput {
    /// Transaction to submit.
    pub tx: Transaction,
    /// Host context at submission.
    pub ctx: LedgerContext,
}

/// One output line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    /// 1-based input line number.
    pub line: usize,
    /// 1 for approve, 0 for reject.
    pub result: u64,
    /// Route taken, if any.
    pub route: Option<Route>,
    /// Rejection category.
    pub category: Option<RejectCategory>,
    /// Human-readable rejection reason.
    pub reason: Option<String>,
}

impl DecisionRecord {
    fn new(line: usize, decision: &Decision) -> Self {
        Self {
            line,
            result: decision.as_u64(),
            route: decision.route,
            category: decision.category(),
            reason: decision.reason.as_ref().map(ToString::to_string),
        }
    }
}

/// Totals over a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Transactions evaluated.
    pub processed: usize,
    /// Transactions approved.
    pub approved: usize,
}

/// Evaluate every transaction from `input` in order, writing one
/// [`DecisionRecord`] per line to `out`.
pub fn replay<A, R, W>(api: &A, input: R, mut out: W) -> Result<ReplaySummary>
where
    A: RewardProgramApi,
    R: BufRead,
    W: Write,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("reading line {number}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let entry: ReplayInput = serde_json::from_str(trimmed)
            .with_context(|| format!("parsing transaction on line {number}"))?;
        debug!(line = number, sender = %entry.tx.sender, "replaying");

        let decision = api
            .process(&entry.tx, &entry.ctx)
            .with_context(|| format!("processing line {number}"))?;

        summary.processed += 1;
        if decision.approved {
            summary.approved += 1;
        }

        serde_json::to_writer(&mut out, &DecisionRecord::new(number, &decision))?;
        writeln!(out)?;
    }

    Ok(summary)
}
