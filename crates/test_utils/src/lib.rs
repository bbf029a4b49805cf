//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! lost & found test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built users, reports and a seeded in-memory service
//! - `builders`: Builder patterns for items and claims
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
