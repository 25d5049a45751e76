//! # Ambassador Telemetry
//!
//! Structured logging for the reward program runtime, built on
//! `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ambassador_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("logging already initialized");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AR_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `AR_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `AR_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `AR_SERVICE_NAME` | `ambassador-rewards` | Service name |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// Log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}
