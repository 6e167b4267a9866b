//! ClickHouse adapter
//!
//! Implementation of the analytics client for ClickHouse.

pub mod client;

pub use client::ClickHouseClient;
