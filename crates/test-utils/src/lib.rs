//! Shared helpers for fixkit's integration tests: catalog builders and
//! on-disk script fixtures.

pub mod builders;
pub mod scripts;
