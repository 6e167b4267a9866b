//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::app::ChallengeInput;
use crate::domain::entities::{
    ActivityKind, MeditationSession, NewActivity, NewSession, SessionId, User, UserId,
};

/// Create a public test user with default values
pub fn test_user() -> User {
    let id = UserId(Uuid::new_v4());
    User {
        id,
        email: Some(format!("user-{}@example.com", id.0.simple())),
        password_hash: None,
        display_name: Some("test-user".to_string()),
        bio: String::new(),
        photo_url: None,
        is_public: true,
        created_at: Utc::now(),
    }
}

/// Create a public test user with a specific display name
pub fn test_user_named(name: &str) -> User {
    User {
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        display_name: Some(name.to_string()),
        ..test_user()
    }
}

/// Session input of 20 minutes of guided meditation at 08:00 on `date`
pub fn test_new_session(date: NaiveDate) -> NewSession {
    NewSession {
        duration_minutes: 20,
        meditation_type: "Guided".to_string(),
        session_date: date,
        time_of_day: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        location: "Home".to_string(),
        notes: None,
        mood_before: None,
        mood_after: None,
    }
}

/// Create a stored session on `date` starting at `hour`
pub fn test_session_on(date: NaiveDate, hour: u32, duration_minutes: i32) -> MeditationSession {
    MeditationSession {
        id: SessionId::new(),
        user_id: UserId::new(),
        duration_minutes,
        meditation_type: "Guided".to_string(),
        session_date: date,
        time_of_day: NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default(),
        location: "Home".to_string(),
        notes: None,
        mood_before: None,
        mood_after: None,
        created_at: Utc::now(),
    }
}

/// Session activity by `actor` at `occurred_at`
pub fn test_activity(actor: UserId, occurred_at: DateTime<Utc>) -> NewActivity {
    NewActivity {
        actor_id: actor,
        kind: ActivityKind::Session,
        message: "Guided 20m".to_string(),
        occurred_at,
        target_id: None,
        related_id: None,
    }
}

/// Open-ended community challenge input
pub fn test_challenge_input(name: &str, target_minutes: i32, start: NaiveDate) -> ChallengeInput {
    ChallengeInput {
        name: name.to_string(),
        target_minutes,
        target_days: None,
        start_date: Some(start),
        end_date: None,
        is_private: false,
    }
}
