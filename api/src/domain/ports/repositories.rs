//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Activity, ActivityId, Badge, Challenge, ChallengeId, ChallengeProgress, MeditationSession,
    MeditationType, NewActivity, NewChallenge, NewReminder, NewSession, NewUser, Reminder,
    ReminderId, SocialIdentity, Subscription, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities and their credentials
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find several users at once; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Find the user linked to a social login
    async fn find_by_social(&self, identity: &SocialIdentity)
        -> Result<Option<User>, DomainError>;

    /// Link a social login to a user
    async fn link_social(&self, id: &UserId, identity: &SocialIdentity)
        -> Result<(), DomainError>;

    /// Replace the profile bio
    async fn update_bio(&self, id: &UserId, bio: &str) -> Result<(), DomainError>;

    /// Replace the profile photo URL
    async fn update_photo(&self, id: &UserId, photo_url: &str) -> Result<(), DomainError>;

    /// Make the profile public or private
    async fn set_visibility(&self, id: &UserId, is_public: bool) -> Result<(), DomainError>;

    /// Store the hash of a newly issued bearer token
    async fn store_token(&self, id: &UserId, token_hash: &str) -> Result<(), DomainError>;

    /// Resolve a bearer token hash to its user
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, DomainError>;
}

/// Repository for meditation sessions and custom meditation types
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session
    async fn create(
        &self,
        user_id: &UserId,
        session: &NewSession,
    ) -> Result<MeditationSession, DomainError>;

    /// All sessions of a user, newest first
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<MeditationSession>, DomainError>;

    /// Add a custom meditation type; fails with `AlreadyExists` on a duplicate name
    async fn add_type(&self, user_id: &UserId, name: &str) -> Result<MeditationType, DomainError>;

    /// Custom meditation types of a user, in creation order
    async fn find_types(&self, user_id: &UserId) -> Result<Vec<MeditationType>, DomainError>;
}

/// Repository for activity feed records
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Append an activity; the store assigns the next sequence id
    async fn append(&self, activity: &NewActivity) -> Result<Activity, DomainError>;

    /// Find an activity by ID
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError>;

    /// Most recent activity of a user, newest first
    async fn find_recent_by_actor(
        &self,
        actor_id: &UserId,
        limit: u64,
    ) -> Result<Vec<Activity>, DomainError>;
}

/// Repository for follow relationships
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Create a follow; following twice is a no-op
    async fn follow(&self, follower: &UserId, followed: &UserId) -> Result<(), DomainError>;

    /// Remove a follow if present
    async fn unfollow(&self, follower: &UserId, followed: &UserId) -> Result<(), DomainError>;

    /// Users following `user_id`, ordered by id
    async fn followers(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError>;

    /// Users `user_id` follows, ordered by id
    async fn following(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError>;
}

/// Repository for reminder preferences
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// Create a reminder
    async fn create(&self, user_id: &UserId, reminder: &NewReminder)
        -> Result<Reminder, DomainError>;

    /// Reminders of a user in creation order
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Reminder>, DomainError>;

    /// Enable or disable a reminder owned by `user_id`
    async fn set_enabled(
        &self,
        user_id: &UserId,
        id: &ReminderId,
        enabled: bool,
    ) -> Result<Reminder, DomainError>;

    /// Delete a reminder owned by `user_id`
    async fn delete(&self, user_id: &UserId, id: &ReminderId) -> Result<(), DomainError>;
}

/// Repository for subscriptions
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Current subscription of a user, if any
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError>;

    /// Create or replace the subscription of a user
    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError>;
}

/// Repository for challenges and per-user progress
#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    /// Create a challenge
    async fn create(&self, challenge: &NewChallenge) -> Result<Challenge, DomainError>;

    /// Find a challenge by ID
    async fn find_by_id(&self, id: &ChallengeId) -> Result<Option<Challenge>, DomainError>;

    /// Public challenges, oldest start date first
    async fn find_community(&self) -> Result<Vec<Challenge>, DomainError>;

    /// Private challenges created by a user
    async fn find_private_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Challenge>, DomainError>;

    /// Join a challenge; joining again returns the existing progress
    async fn join(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
    ) -> Result<ChallengeProgress, DomainError>;

    /// Progress of a user in a challenge, if joined
    async fn find_progress(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
    ) -> Result<Option<ChallengeProgress>, DomainError>;

    /// Challenges a user joined, with their progress
    async fn find_joined(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(Challenge, ChallengeProgress)>, DomainError>;

    /// Add minutes to a joined challenge
    async fn add_minutes(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
        minutes: i32,
    ) -> Result<ChallengeProgress, DomainError>;

    /// Record when a challenge was completed
    async fn mark_completed(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
}

/// Repository for badges
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// Award a badge; returns false if the user already had it
    async fn award(&self, user_id: &UserId, name: &str) -> Result<bool, DomainError>;

    /// Badges of a user, oldest first
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError>;
}
