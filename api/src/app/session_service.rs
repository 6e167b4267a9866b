//! Session service
//!
//! Logs meditation sessions and mirrors each one into the activity feed.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{
    normalize_type_name, ActivityKind, MeditationSession, MeditationType, NewActivity,
    NewSession, User,
};
use crate::domain::ports::{
    track_quietly, ActivityRepository, AnalyticsClient, SessionRepository, UsageEvent,
};
use crate::error::AppError;

/// Service for logging and reading sessions
pub struct SessionService<SR, AR, AC>
where
    SR: SessionRepository,
    AR: ActivityRepository,
    AC: AnalyticsClient,
{
    sessions: Arc<SR>,
    activities: Arc<AR>,
    analytics: Arc<AC>,
}

impl<SR, AR, AC> SessionService<SR, AR, AC>
where
    SR: SessionRepository,
    AR: ActivityRepository,
    AC: AnalyticsClient,
{
    pub fn new(sessions: Arc<SR>, activities: Arc<AR>, analytics: Arc<AC>) -> Self {
        Self {
            sessions,
            activities,
            analytics,
        }
    }

    /// Log a session for `user`
    ///
    /// The feed entry is stamped with the session's own date and time so that
    /// back-filled sessions sort where they happened.
    pub async fn log_session(
        &self,
        user: &User,
        session: NewSession,
    ) -> Result<MeditationSession, AppError> {
        session.validate()?;

        let stored = self.sessions.create(&user.id, &session).await?;

        self.activities
            .append(&NewActivity {
                actor_id: user.id,
                kind: ActivityKind::Session,
                message: session.summary(),
                occurred_at: stored.started_at(),
                target_id: None,
                related_id: None,
            })
            .await?;

        track_quietly(
            self.analytics.as_ref(),
            UsageEvent::SessionLogged {
                user_id: user.id,
                minutes: stored.duration_minutes,
                timestamp: Utc::now(),
            },
        )
        .await;

        Ok(stored)
    }

    /// All sessions of `user`, newest first
    pub async fn list_sessions(&self, user: &User) -> Result<Vec<MeditationSession>, AppError> {
        Ok(self.sessions.find_by_user(&user.id).await?)
    }

    /// (before, after) mood pairs of `user`, oldest session first
    pub async fn moods(&self, user: &User) -> Result<Vec<(i32, i32)>, AppError> {
        let mut sessions = self.sessions.find_by_user(&user.id).await?;
        sessions.reverse();
        Ok(crate::domain::stats::mood_correlation_points(&sessions))
    }

    /// Add a custom meditation type for `user`
    pub async fn add_type(&self, user: &User, name: &str) -> Result<MeditationType, AppError> {
        let name = normalize_type_name(name)?;
        Ok(self.sessions.add_type(&user.id, &name).await?)
    }

    /// Custom meditation types of `user`
    pub async fn list_types(&self, user: &User) -> Result<Vec<MeditationType>, AppError> {
        Ok(self.sessions.find_types(&user.id).await?)
    }
}
