//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::entities::{
    Activity, ActivityId, Badge, Challenge, ChallengeId, ChallengeProgress, MeditationSession,
    MeditationType, NewActivity, NewChallenge, NewReminder, NewSession, NewUser, Reminder,
    ReminderId, SessionId, SocialIdentity, Subscription, User, UserId,
};
use crate::domain::ports::{
    ActivityRepository, AnalyticsClient, BadgeRepository, ChallengeRepository, FollowRepository,
    ReminderRepository, SessionRepository, SubscriptionRepository, UsageEvent, UserRepository,
};
use crate::error::{AnalyticsError, DomainError};

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    by_social: Arc<RwLock<HashMap<SocialIdentity, UserId>>>,
    by_token: Arc<RwLock<HashMap<String, UserId>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        users.into_iter().fold(self, |repo, user| repo.with_user(user))
    }

    fn update<F: FnOnce(&mut User)>(&self, id: &UserId, f: F) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("User {}", id)))?;
        f(user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if let Some(email) = &new_user.email {
            if users.values().any(|u| u.email.as_ref() == Some(email)) {
                return Err(DomainError::AlreadyExists(format!("User {}", email)));
            }
        }

        let user = User {
            id: UserId::new(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            display_name: new_user.display_name.clone(),
            bio: new_user.bio.clone(),
            photo_url: new_user.photo_url.clone(),
            is_public: new_user.is_public,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_social(&self, identity: &SocialIdentity) -> Result<Option<User>, DomainError> {
        let id = self.by_social.read().unwrap().get(identity).copied();
        Ok(id.and_then(|id| self.users.read().unwrap().get(&id).cloned()))
    }

    async fn link_social(&self, id: &UserId, identity: &SocialIdentity) -> Result<(), DomainError> {
        let mut by_social = self.by_social.write().unwrap();
        if by_social.contains_key(identity) {
            return Err(DomainError::AlreadyExists(format!(
                "Social account {}",
                identity.provider
            )));
        }
        by_social.insert(identity.clone(), *id);
        Ok(())
    }

    async fn update_bio(&self, id: &UserId, bio: &str) -> Result<(), DomainError> {
        self.update(id, |u| u.bio = bio.to_string())
    }

    async fn update_photo(&self, id: &UserId, photo_url: &str) -> Result<(), DomainError> {
        self.update(id, |u| u.photo_url = Some(photo_url.to_string()))
    }

    async fn set_visibility(&self, id: &UserId, is_public: bool) -> Result<(), DomainError> {
        self.update(id, |u| u.is_public = is_public)
    }

    async fn store_token(&self, id: &UserId, token_hash: &str) -> Result<(), DomainError> {
        self.by_token
            .write()
            .unwrap()
            .insert(token_hash.to_string(), *id);
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, DomainError> {
        let id = self.by_token.read().unwrap().get(token_hash).copied();
        Ok(id.and_then(|id| self.users.read().unwrap().get(&id).cloned()))
    }
}

// ============================================================================
// In-Memory Session Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<Vec<MeditationSession>>>,
    types: Arc<RwLock<Vec<MeditationType>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(
        &self,
        user_id: &UserId,
        session: &NewSession,
    ) -> Result<MeditationSession, DomainError> {
        let stored = MeditationSession {
            id: SessionId::new(),
            user_id: *user_id,
            duration_minutes: session.duration_minutes,
            meditation_type: session.meditation_type.trim().to_string(),
            session_date: session.session_date,
            time_of_day: session.time_of_day,
            location: session.location.clone(),
            notes: session.notes.clone(),
            mood_before: session.mood_before,
            mood_after: session.mood_after,
            created_at: Utc::now(),
        };
        self.sessions.write().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<MeditationSession>, DomainError> {
        let mut result: Vec<MeditationSession> = self
            .sessions
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect();
        result.sort_by_key(|s| Reverse((s.session_date, s.time_of_day, s.created_at)));
        Ok(result)
    }

    async fn add_type(&self, user_id: &UserId, name: &str) -> Result<MeditationType, DomainError> {
        let mut types = self.types.write().unwrap();
        if types
            .iter()
            .any(|t| t.user_id == *user_id && t.name.eq_ignore_ascii_case(name))
        {
            return Err(DomainError::AlreadyExists(format!("Type {}", name)));
        }
        let kind = MeditationType {
            id: Uuid::new_v4(),
            user_id: *user_id,
            name: name.to_string(),
        };
        types.push(kind.clone());
        Ok(kind)
    }

    async fn find_types(&self, user_id: &UserId) -> Result<Vec<MeditationType>, DomainError> {
        let types = self.types.read().unwrap();
        Ok(types
            .iter()
            .filter(|t| t.user_id == *user_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// In-Memory Activity Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryActivityRepository {
    activities: Arc<RwLock<Vec<Activity>>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn append(&self, activity: &NewActivity) -> Result<Activity, DomainError> {
        let mut activities = self.activities.write().unwrap();
        let stored = Activity {
            id: ActivityId(activities.len() as i64 + 1),
            actor_id: activity.actor_id,
            kind: activity.kind,
            message: activity.message.clone(),
            occurred_at: activity.occurred_at,
            target_id: activity.target_id,
            related_id: activity.related_id,
        };
        activities.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        let activities = self.activities.read().unwrap();
        Ok(activities.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_recent_by_actor(
        &self,
        actor: &UserId,
        limit: u64,
    ) -> Result<Vec<Activity>, DomainError> {
        let mut result: Vec<Activity> = self
            .activities
            .read()
            .unwrap()
            .iter()
            .filter(|a| a.actor_id == *actor)
            .cloned()
            .collect();
        result.sort_by_key(|a| Reverse((a.occurred_at, a.id)));
        result.truncate(limit as usize);
        Ok(result)
    }
}

// ============================================================================
// In-Memory Follow Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryFollowRepository {
    /// (follower, followed) pairs
    pairs: Arc<RwLock<BTreeSet<(UserId, UserId)>>>,
}

impl InMemoryFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn follow(&self, follower: &UserId, followed: &UserId) -> Result<(), DomainError> {
        self.pairs.write().unwrap().insert((*follower, *followed));
        Ok(())
    }

    async fn unfollow(&self, follower: &UserId, followed: &UserId) -> Result<(), DomainError> {
        self.pairs.write().unwrap().remove(&(*follower, *followed));
        Ok(())
    }

    async fn followers(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let pairs = self.pairs.read().unwrap();
        let mut ids: Vec<UserId> = pairs
            .iter()
            .filter(|(_, followed)| followed == user_id)
            .map(|(follower, _)| *follower)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn following(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let pairs = self.pairs.read().unwrap();
        Ok(pairs
            .iter()
            .filter(|(follower, _)| follower == user_id)
            .map(|(_, followed)| *followed)
            .collect())
    }
}

// ============================================================================
// In-Memory Reminder Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReminderRepository {
    reminders: Arc<RwLock<Vec<Reminder>>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn reminder_not_found(id: &ReminderId) -> DomainError {
    DomainError::NotFound(format!("Reminder {}", id))
}

#[async_trait]
impl ReminderRepository for InMemoryReminderRepository {
    async fn create(
        &self,
        user_id: &UserId,
        reminder: &NewReminder,
    ) -> Result<Reminder, DomainError> {
        let stored = Reminder {
            id: ReminderId(Uuid::new_v4()),
            user_id: *user_id,
            reminder_time: reminder.reminder_time,
            message: reminder.message.clone(),
            enabled: reminder.enabled,
        };
        self.reminders.write().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Reminder>, DomainError> {
        let reminders = self.reminders.read().unwrap();
        Ok(reminders
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn set_enabled(
        &self,
        user_id: &UserId,
        id: &ReminderId,
        enabled: bool,
    ) -> Result<Reminder, DomainError> {
        let mut reminders = self.reminders.write().unwrap();
        let reminder = reminders
            .iter_mut()
            .find(|r| r.id == *id && r.user_id == *user_id)
            .ok_or_else(|| reminder_not_found(id))?;
        reminder.enabled = enabled;
        Ok(reminder.clone())
    }

    async fn delete(&self, user_id: &UserId, id: &ReminderId) -> Result<(), DomainError> {
        let mut reminders = self.reminders.write().unwrap();
        let before = reminders.len();
        reminders.retain(|r| !(r.id == *id && r.user_id == *user_id));
        if reminders.len() == before {
            return Err(reminder_not_found(id));
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory Subscription Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<HashMap<UserId, Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.subscriptions.read().unwrap().get(user_id).cloned())
    }

    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.subscriptions
            .write()
            .unwrap()
            .insert(subscription.user_id, subscription.clone());
        Ok(())
    }
}

// ============================================================================
// In-Memory Challenge Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryChallengeRepository {
    challenges: Arc<RwLock<Vec<Challenge>>>,
    progress: Arc<RwLock<Vec<ChallengeProgress>>>,
}

impl InMemoryChallengeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_progress<T, F>(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
        f: F,
    ) -> Result<T, DomainError>
    where
        F: FnOnce(&mut ChallengeProgress) -> T,
    {
        let mut progress = self.progress.write().unwrap();
        let entry = progress
            .iter_mut()
            .find(|p| p.user_id == *user_id && p.challenge_id == *challenge_id)
            .ok_or_else(|| DomainError::NotFound(format!("Progress in {}", challenge_id)))?;
        Ok(f(entry))
    }
}

#[async_trait]
impl ChallengeRepository for InMemoryChallengeRepository {
    async fn create(&self, challenge: &NewChallenge) -> Result<Challenge, DomainError> {
        let stored = Challenge {
            id: ChallengeId::new(),
            name: challenge.name.clone(),
            target_minutes: challenge.target_minutes,
            target_days: challenge.target_days,
            start_date: challenge.start_date,
            end_date: challenge.end_date,
            is_private: challenge.is_private,
            creator_id: challenge.creator_id,
            created_at: Utc::now(),
        };
        self.challenges.write().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &ChallengeId) -> Result<Option<Challenge>, DomainError> {
        let challenges = self.challenges.read().unwrap();
        Ok(challenges.iter().find(|c| c.id == *id).cloned())
    }

    async fn find_community(&self) -> Result<Vec<Challenge>, DomainError> {
        let mut result: Vec<Challenge> = self
            .challenges
            .read()
            .unwrap()
            .iter()
            .filter(|c| !c.is_private)
            .cloned()
            .collect();
        result.sort_by_key(|c| c.start_date);
        Ok(result)
    }

    async fn find_private_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Challenge>, DomainError> {
        let challenges = self.challenges.read().unwrap();
        Ok(challenges
            .iter()
            .filter(|c| c.is_private && c.creator_id.as_ref() == Some(creator))
            .cloned()
            .collect())
    }

    async fn join(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
    ) -> Result<ChallengeProgress, DomainError> {
        let mut progress = self.progress.write().unwrap();
        if let Some(existing) = progress
            .iter()
            .find(|p| p.user_id == *user_id && p.challenge_id == *challenge_id)
        {
            return Ok(existing.clone());
        }
        let joined = ChallengeProgress {
            user_id: *user_id,
            challenge_id: *challenge_id,
            minutes: 0,
            completed_at: None,
        };
        progress.push(joined.clone());
        Ok(joined)
    }

    async fn find_progress(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
    ) -> Result<Option<ChallengeProgress>, DomainError> {
        let progress = self.progress.read().unwrap();
        Ok(progress
            .iter()
            .find(|p| p.user_id == *user_id && p.challenge_id == *challenge_id)
            .cloned())
    }

    async fn find_joined(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(Challenge, ChallengeProgress)>, DomainError> {
        let challenges = self.challenges.read().unwrap();
        let progress = self.progress.read().unwrap();
        Ok(progress
            .iter()
            .filter(|p| p.user_id == *user_id)
            .filter_map(|p| {
                challenges
                    .iter()
                    .find(|c| c.id == p.challenge_id)
                    .map(|c| (c.clone(), p.clone()))
            })
            .collect())
    }

    async fn add_minutes(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
        minutes: i32,
    ) -> Result<ChallengeProgress, DomainError> {
        self.with_progress(user_id, challenge_id, |p| {
            p.minutes += minutes;
            p.clone()
        })
    }

    async fn mark_completed(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.with_progress(user_id, challenge_id, |p| {
            p.completed_at.get_or_insert(at);
        })
    }
}

// ============================================================================
// In-Memory Badge Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryBadgeRepository {
    badges: Arc<RwLock<Vec<Badge>>>,
}

impl InMemoryBadgeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BadgeRepository for InMemoryBadgeRepository {
    async fn award(&self, user_id: &UserId, name: &str) -> Result<bool, DomainError> {
        let mut badges = self.badges.write().unwrap();
        if badges
            .iter()
            .any(|b| b.user_id == *user_id && b.name == name)
        {
            return Ok(false);
        }
        badges.push(Badge {
            user_id: *user_id,
            name: name.to_string(),
            awarded_at: Utc::now(),
        });
        Ok(true)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError> {
        let badges = self.badges.read().unwrap();
        Ok(badges
            .iter()
            .filter(|b| b.user_id == *user_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Recording Analytics Client
// ============================================================================

/// Analytics client that keeps every tracked event in memory
#[derive(Default)]
pub struct RecordingAnalyticsClient {
    pub events: Arc<RwLock<Vec<UsageEvent>>>,
}

impl RecordingAnalyticsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<UsageEvent> {
        self.events.read().unwrap().clone()
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.read().unwrap().iter().map(|e| e.name()).collect()
    }
}

#[async_trait]
impl AnalyticsClient for RecordingAnalyticsClient {
    async fn track(&self, event: UsageEvent) -> Result<(), AnalyticsError> {
        self.events.write().unwrap().push(event);
        Ok(())
    }
}

/// Analytics client whose sink is always down
#[derive(Default)]
pub struct FailingAnalyticsClient;

#[async_trait]
impl AnalyticsClient for FailingAnalyticsClient {
    async fn track(&self, _event: UsageEvent) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::Query("sink unavailable".to_string()))
    }
}
