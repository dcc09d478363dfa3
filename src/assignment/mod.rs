//! The assignment engine: which waiter serves which table.
//!
//! - [`index`]: the waiter ↔ table indexes, always changed together
//! - [`constraint`]: the per-restaurant capacity check
//! - [`suggest`]: alternative waiters when the check fails
//! - [`loader`]: one-time load from the repository
//! - [`query`]: read views and natural-key lookups
//! - [`engine`]: the public operations
//! - [`shared`]: lock-guarded engine for concurrent hosts

pub mod constraint;
pub mod engine;
pub mod index;
pub mod loader;
pub mod query;
pub mod shared;
pub mod suggest;

pub use engine::{AssignOutcome, AssignmentEngine, UnresolvedKey};
pub use shared::SharedEngine;
