//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! Every port has an in-memory implementation so services can be exercised
//! without PostgreSQL or ClickHouse.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
