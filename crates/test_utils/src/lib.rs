//! Test Utilities Crate
//!
//! Shared test infrastructure for the bill service test suites.
//!
//! # Modules
//!
//! - `fixtures`: Valid product and customer inputs, fixed or randomized
//! - `database`: PostgreSQL container management for adapter tests
//! - `generators`: Property-based strategies for line-item sets

pub mod fixtures;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use database::*;
pub use generators::*;
