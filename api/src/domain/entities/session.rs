//! Meditation session domain entity
//!
//! A session is created when a user logs a sit and is never mutated afterwards.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;
use crate::error::DomainError;

/// Longest session we accept, one full day
pub const MAX_SESSION_MINUTES: i32 = 24 * 60;

/// Maximum length of a custom meditation type name
pub const MAX_TYPE_NAME_LEN: usize = 50;

/// Unique identifier for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported mood on a 1-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Mood(u8);

impl Mood {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    pub fn value(&self) -> i32 {
        self.0 as i32
    }
}

impl TryFrom<i32> for Mood {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Mood(value as u8))
        } else {
            Err(DomainError::Validation(format!(
                "Mood must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }
}

impl From<Mood> for i32 {
    fn from(mood: Mood) -> Self {
        mood.value()
    }
}

/// A logged meditation session
#[derive(Debug, Clone, Serialize)]
pub struct MeditationSession {
    pub id: SessionId,
    pub user_id: UserId,
    pub duration_minutes: i32,
    pub meditation_type: String,
    pub session_date: NaiveDate,
    pub time_of_day: NaiveTime,
    pub location: String,
    pub notes: Option<String>,
    pub mood_before: Option<Mood>,
    pub mood_after: Option<Mood>,
    pub created_at: DateTime<Utc>,
}

impl MeditationSession {
    /// When the session took place, as a UTC instant
    pub fn started_at(&self) -> DateTime<Utc> {
        NaiveDateTime::new(self.session_date, self.time_of_day).and_utc()
    }

    /// The before/after mood pair, if both were recorded
    pub fn mood_pair(&self) -> Option<(Mood, Mood)> {
        self.mood_before.zip(self.mood_after)
    }
}

/// Data needed to log a new session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub duration_minutes: i32,
    pub meditation_type: String,
    pub session_date: NaiveDate,
    pub time_of_day: NaiveTime,
    pub location: String,
    pub notes: Option<String>,
    pub mood_before: Option<Mood>,
    pub mood_after: Option<Mood>,
}

impl NewSession {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(1..=MAX_SESSION_MINUTES).contains(&self.duration_minutes) {
            return Err(DomainError::Validation(format!(
                "Duration must be between 1 and {} minutes",
                MAX_SESSION_MINUTES
            )));
        }
        if self.meditation_type.trim().is_empty() {
            return Err(DomainError::Validation(
                "Meditation type is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Feed message for this session, e.g. `Guided 20m`
    pub fn summary(&self) -> String {
        format!("{} {}m", self.meditation_type.trim(), self.duration_minutes)
    }
}

/// A user-defined meditation type
#[derive(Debug, Clone, Serialize)]
pub struct MeditationType {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
}

/// Trim and validate a custom meditation type name
pub fn normalize_type_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_TYPE_NAME_LEN {
        return Err(DomainError::Validation(format!(
            "Type name must be between 1 and {} characters",
            MAX_TYPE_NAME_LEN
        )));
    }
    Ok(name.to_string())
}
