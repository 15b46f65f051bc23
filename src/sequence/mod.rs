// src/sequence/mod.rs

//! Sequence coordination.
//!
//! Drives a fixed, ordered list of [`crate::runner::ScriptTask`]s through the
//! process runner one at a time, skipping entries whose script file is
//! missing and emitting a single completion event at the end.

pub mod coordinator;

pub use coordinator::{run_sequence, SequenceOptions};
