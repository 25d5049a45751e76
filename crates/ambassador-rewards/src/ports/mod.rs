//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the program core and its host.
//!
//! - **Driving Port (Inbound)**: `RewardProgramApi`
//! - **Driven Port (Outbound)**: `StateStore`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
