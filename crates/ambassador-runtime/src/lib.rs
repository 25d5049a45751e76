//! # Ambassador Runtime
//!
//! Host emulation for the reward program: reads transactions as JSON lines,
//! evaluates each against an in-memory store, and reports decisions.
//!
//! ## Input Format
//!
//! One JSON object per line; blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! {"tx": {"sender": "…", "target": "create", "args": ["0x01", …]}, "ctx": {"round": 1, "latest_timestamp": 1700000000}}
//! ```

#![warn(missing_docs)]

pub mod replay;

pub use replay::{replay, DecisionRecord, ReplayInput, ReplaySummary};
