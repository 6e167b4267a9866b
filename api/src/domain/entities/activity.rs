//! Activity domain entity
//!
//! Entries in the social activity feed. Activities are append-only: once
//! written they are never edited, and their id is a store-assigned sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::error::DomainError;

/// Maximum length of a comment or encouragement
pub const MAX_MESSAGE_LEN: usize = 500;

/// Sequence number of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub i64);

impl From<i64> for ActivityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of activity this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Session,
    Comment,
    Encouragement,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::Session => write!(f, "session"),
            ActivityKind::Comment => write!(f, "comment"),
            ActivityKind::Encouragement => write!(f, "encouragement"),
        }
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "session" => Ok(ActivityKind::Session),
            "comment" => Ok(ActivityKind::Comment),
            "encouragement" => Ok(ActivityKind::Encouragement),
            _ => Err(format!("Unknown activity kind: {}", s)),
        }
    }
}

/// A single activity record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: ActivityId,
    pub actor_id: UserId,
    pub kind: ActivityKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
    /// User a comment or encouragement is directed at
    pub target_id: Option<UserId>,
    /// Activity a comment or encouragement responds to
    pub related_id: Option<ActivityId>,
}

/// Data needed to append an activity
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub actor_id: UserId,
    pub kind: ActivityKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
    pub target_id: Option<UserId>,
    pub related_id: Option<ActivityId>,
}

impl NewActivity {
    /// Build a reply (comment or encouragement) to an existing activity
    pub fn reply(
        actor_id: UserId,
        kind: ActivityKind,
        text: &str,
        to: &Activity,
    ) -> Result<Self, DomainError> {
        if kind == ActivityKind::Session {
            return Err(DomainError::Validation(
                "Sessions cannot be posted as replies".to_string(),
            ));
        }
        let text = text.trim();
        if text.is_empty() || text.chars().count() > MAX_MESSAGE_LEN {
            return Err(DomainError::Validation(format!(
                "Message must be between 1 and {} characters",
                MAX_MESSAGE_LEN
            )));
        }
        Ok(Self {
            actor_id,
            kind,
            message: text.to_string(),
            occurred_at: Utc::now(),
            target_id: Some(to.actor_id),
            related_id: Some(to.id),
        })
    }
}
