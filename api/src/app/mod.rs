//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod auth_service;
pub mod challenge_service;
pub mod dashboard_service;
pub mod feed_service;
pub mod profile_service;
pub mod reminder_service;
pub mod session_service;
pub mod social_service;
pub mod subscription_service;

pub use auth_service::AuthService;
pub use challenge_service::{ChallengeInput, ChallengeService};
pub use dashboard_service::{DashboardService, SessionAnalytics};
pub use feed_service::{FeedEntry, FeedService};
pub use profile_service::{ProfileService, ProfileStats};
pub use reminder_service::ReminderService;
pub use session_service::SessionService;
pub use social_service::SocialService;
pub use subscription_service::SubscriptionService;
