//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the billing system test suite.
//!
//! # Modules
//!
//! - `memory`: In-memory implementations of the domain ports
//! - `builders`: Builder patterns for test data construction
//! - `fixtures`: Pre-built test data for common entities

pub mod memory;
pub mod builders;
pub mod fixtures;

pub use memory::*;
pub use builders::*;
pub use fixtures::*;
