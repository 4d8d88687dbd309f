//! Test infrastructure for RouterOS API high-level queries
//!
//! Provides:
//! - Reply fixtures for `/interface/print`
//! - A preloaded replay connection
//! - Owned snapshots of borrowed interface records
//! - Expectation-based verification helpers

pub mod fixtures;
mod verification;

pub use fixtures::*;
pub use verification::*;
