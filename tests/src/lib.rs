//! # Ambassador Rewards Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── dispatch_benchmarks.rs   # criterion: dispatcher, service, persistence
//! └── src/integration/
//!     ├── fixtures.rs              # Harness over the in-memory ledger
//!     ├── lifecycle.rs             # create / opt-in / closeout / claim flows
//!     ├── persistence.rs           # key/value and JSON snapshots
//!     └── properties.rs            # proptest over random transaction sequences
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ar-tests
//! cargo test -p ar-tests integration::properties
//! cargo bench -p ar-tests
//! ```

#![allow(dead_code)]
#![allow(clippy::missing_panics_doc)]

pub mod integration;
