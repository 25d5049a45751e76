//! # Integration Flows
//!
//! Multi-transaction scenarios against the service and the in-memory ledger.

pub mod fixtures;
pub mod lifecycle;
pub mod persistence;
