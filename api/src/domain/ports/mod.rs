//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod analytics;
pub mod repositories;

pub use analytics::{track_quietly, AnalyticsClient, UsageEvent};
pub use repositories::{
    ActivityRepository, BadgeRepository, ChallengeRepository, FollowRepository,
    ReminderRepository, SessionRepository, SubscriptionRepository, UserRepository,
};
