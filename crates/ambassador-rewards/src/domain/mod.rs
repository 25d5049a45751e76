//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the reward program.
//! NO I/O, NO locking, NO host dependencies.
//!
//! Adapters and the service depend on this layer, never the other way around.

pub mod entities;
pub mod invariants;
pub mod kv;
pub mod registry;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use kv::{KvMap, KvSnapshot, StateSnapshot, StoredValue};
pub use registry::RoleRegistry;
pub use value_objects::*;
