//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies
//! - `streak`, `feed`, `stats`: Pure computations over already-fetched records

pub mod entities;
pub mod feed;
pub mod ports;
pub mod stats;
pub mod streak;
