//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod activity_repo;
pub mod badge_repo;
pub mod challenge_repo;
pub mod follow_repo;
pub mod reminder_repo;
pub mod session_repo;
pub mod subscription_repo;
pub mod user_repo;


pub use activity_repo::PostgresActivityRepository;
pub use badge_repo::PostgresBadgeRepository;
pub use challenge_repo::PostgresChallengeRepository;
pub use follow_repo::PostgresFollowRepository;
pub use reminder_repo::PostgresReminderRepository;
pub use session_repo::PostgresSessionRepository;
pub use subscription_repo::PostgresSubscriptionRepository;
pub use user_repo::PostgresUserRepository;
