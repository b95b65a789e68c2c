//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! Capsule client test suite.
//!
//! # Modules
//!
//! - `fixtures`: Canned Capsule responses and ready-made records
//! - `builders`: Builder patterns for test data construction
//! - `server`: Mock Capsule server built on wiremock
//! - `assertions`: Custom assertion helpers for port results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod server;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use server::*;
pub use assertions::*;
pub use generators::*;
