//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod clickhouse;
pub mod postgres;

pub use clickhouse::ClickHouseClient;
pub use postgres::{
    PostgresActivityRepository, PostgresBadgeRepository, PostgresChallengeRepository,
    PostgresFollowRepository, PostgresReminderRepository, PostgresSessionRepository,
    PostgresSubscriptionRepository, PostgresUserRepository,
};
