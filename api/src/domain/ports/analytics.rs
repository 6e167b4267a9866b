//! Analytics client port trait
//!
//! Defines the interface for recording usage events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ChallengeId, UserId};
use crate::error::AnalyticsError;

/// Event types for analytics tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UsageEvent {
    SignedUp {
        user_id: UserId,
        timestamp: DateTime<Utc>,
    },
    LoggedIn {
        user_id: UserId,
        timestamp: DateTime<Utc>,
    },
    SessionLogged {
        user_id: UserId,
        minutes: i32,
        timestamp: DateTime<Utc>,
    },
    ChallengeJoined {
        user_id: UserId,
        challenge_id: ChallengeId,
        timestamp: DateTime<Utc>,
    },
    BadgeAwarded {
        user_id: UserId,
        badge: String,
        timestamp: DateTime<Utc>,
    },
}

impl UsageEvent {
    /// Stable name used as the event type column
    pub fn name(&self) -> &'static str {
        match self {
            UsageEvent::SignedUp { .. } => "signup",
            UsageEvent::LoggedIn { .. } => "login",
            UsageEvent::SessionLogged { .. } => "session_logged",
            UsageEvent::ChallengeJoined { .. } => "challenge_joined",
            UsageEvent::BadgeAwarded { .. } => "badge_awarded",
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            UsageEvent::SignedUp { user_id, .. }
            | UsageEvent::LoggedIn { user_id, .. }
            | UsageEvent::SessionLogged { user_id, .. }
            | UsageEvent::ChallengeJoined { user_id, .. }
            | UsageEvent::BadgeAwarded { user_id, .. } => *user_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            UsageEvent::SignedUp { timestamp, .. }
            | UsageEvent::LoggedIn { timestamp, .. }
            | UsageEvent::SessionLogged { timestamp, .. }
            | UsageEvent::ChallengeJoined { timestamp, .. }
            | UsageEvent::BadgeAwarded { timestamp, .. } => *timestamp,
        }
    }
}

/// Port trait for analytics operations
#[async_trait]
pub trait AnalyticsClient: Send + Sync {
    /// Track a usage event
    async fn track(&self, event: UsageEvent) -> Result<(), AnalyticsError>;
}

/// Track an event, logging instead of failing when the sink is unavailable
pub async fn track_quietly<AC: AnalyticsClient + ?Sized>(analytics: &AC, event: UsageEvent) {
    let name = event.name();
    if let Err(e) = analytics.track(event).await {
        tracing::warn!(error = %e, event = name, "Failed to track usage event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_type_tag() {
        let event = UsageEvent::SessionLogged {
            user_id: UserId::new(),
            minutes: 20,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SessionLogged");
        assert_eq!(json["minutes"], 20);
        assert_eq!(event.name(), "session_logged");
    }
}
