//! Persisted bot state

pub mod counters;

// Re-exports for convenience
pub use counters::{CounterRecord, CountersStore, MembershipTransition};
