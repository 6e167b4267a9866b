//! Challenge and badge domain entities
//!
//! Community challenges are public and anyone can join. Private challenges are
//! personal goals visible only to their creator. Completing a challenge awards
//! a badge named after it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;
use crate::domain::streak::{DurationGoal, StreakGoal};
use crate::error::DomainError;

/// Unique identifier for a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChallengeId(pub Uuid);

impl ChallengeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChallengeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ChallengeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A challenge users can join
#[derive(Debug, Clone, Serialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub name: String,
    pub target_minutes: i32,
    /// Optional consecutive-day requirement on top of the minutes target
    pub target_days: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_private: bool,
    pub creator_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Whether a session on `date` counts toward this challenge
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }

    /// Whether `minutes` logged with a `streak` day run meet every goal
    pub fn is_completed(&self, minutes: i32, streak: u32) -> bool {
        let duration_met = DurationGoal {
            target_minutes: self.target_minutes,
        }
        .is_met(minutes);
        let streak_met = self
            .target_days
            .map_or(true, |days| StreakGoal { target_days: days }.is_met(streak));
        duration_met && streak_met
    }

    /// Private challenges are only visible to and joinable by their creator
    pub fn accessible_by(&self, user: &UserId) -> bool {
        !self.is_private || self.creator_id.as_ref() == Some(user)
    }
}

/// Data needed to create a challenge
#[derive(Debug, Clone)]
pub struct NewChallenge {
    pub name: String,
    pub target_minutes: i32,
    pub target_days: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_private: bool,
    pub creator_id: Option<UserId>,
}

impl NewChallenge {
    pub fn validate(&self) -> Result<(), DomainError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || name_len > 100 {
            return Err(DomainError::Validation(
                "Challenge name must be between 1 and 100 characters".to_string(),
            ));
        }
        if self.target_minutes < 0 {
            return Err(DomainError::Validation(
                "Target minutes cannot be negative".to_string(),
            ));
        }
        if matches!(self.target_days, Some(days) if days < 1) {
            return Err(DomainError::Validation(
                "Target days must be at least 1".to_string(),
            ));
        }
        if matches!(self.end_date, Some(end) if end < self.start_date) {
            return Err(DomainError::Validation(
                "Challenge end date is before its start date".to_string(),
            ));
        }
        Ok(())
    }
}

/// A user's progress in a joined challenge
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeProgress {
    pub user_id: UserId,
    pub challenge_id: ChallengeId,
    pub minutes: i32,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ChallengeProgress {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// A badge awarded to a user
#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    pub user_id: UserId,
    pub name: String,
    pub awarded_at: DateTime<Utc>,
}
