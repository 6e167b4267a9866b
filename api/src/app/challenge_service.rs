//! Challenge service
//!
//! Community and private challenges, per-user progress and badge awards.
//! Minutes reach a challenge either through explicit progress entries or by
//! logging sessions inside the challenge's date window.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::entities::{
    Badge, Challenge, ChallengeId, ChallengeProgress, MeditationSession, NewChallenge, User,
};
use crate::domain::ports::{
    track_quietly, AnalyticsClient, BadgeRepository, ChallengeRepository, SessionRepository,
    UsageEvent,
};
use crate::domain::streak::current_streak;
use crate::error::{AppError, DomainError};

/// Client input for a new challenge
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeInput {
    pub name: String,
    pub target_minutes: i32,
    #[serde(default)]
    pub target_days: Option<i32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_private: bool,
}

pub struct ChallengeService<CR, SR, BR, AC>
where
    CR: ChallengeRepository,
    SR: SessionRepository,
    BR: BadgeRepository,
    AC: AnalyticsClient,
{
    challenges: Arc<CR>,
    sessions: Arc<SR>,
    badges: Arc<BR>,
    analytics: Arc<AC>,
}

impl<CR, SR, BR, AC> ChallengeService<CR, SR, BR, AC>
where
    CR: ChallengeRepository,
    SR: SessionRepository,
    BR: BadgeRepository,
    AC: AnalyticsClient,
{
    pub fn new(challenges: Arc<CR>, sessions: Arc<SR>, badges: Arc<BR>, analytics: Arc<AC>) -> Self {
        Self {
            challenges,
            sessions,
            badges,
            analytics,
        }
    }

    /// Create a challenge owned by `creator`
    pub async fn create(&self, creator: &User, input: ChallengeInput) -> Result<Challenge, AppError> {
        let new_challenge = NewChallenge {
            name: input.name.trim().to_string(),
            target_minutes: input.target_minutes,
            target_days: input.target_days,
            start_date: input.start_date.unwrap_or_else(|| Utc::now().date_naive()),
            end_date: input.end_date,
            is_private: input.is_private,
            creator_id: Some(creator.id),
        };
        new_challenge.validate()?;

        let challenge = self.challenges.create(&new_challenge).await?;
        tracing::info!(
            challenge = %challenge.id,
            creator = %creator.id,
            private = challenge.is_private,
            "Created challenge"
        );
        Ok(challenge)
    }

    pub async fn community(&self) -> Result<Vec<Challenge>, AppError> {
        Ok(self.challenges.find_community().await?)
    }

    pub async fn private_challenges(&self, user: &User) -> Result<Vec<Challenge>, AppError> {
        Ok(self.challenges.find_private_by_creator(&user.id).await?)
    }

    /// Join a challenge; joining again keeps the existing progress
    pub async fn join(&self, user: &User, id: ChallengeId) -> Result<ChallengeProgress, AppError> {
        let challenge = self.find_challenge(&id).await?;
        if !challenge.accessible_by(&user.id) {
            return Err(DomainError::Forbidden(
                "Private challenges can only be joined by their creator".to_string(),
            )
            .into());
        }

        let progress = self.challenges.join(&user.id, &id).await?;
        track_quietly(
            self.analytics.as_ref(),
            UsageEvent::ChallengeJoined {
                user_id: user.id,
                challenge_id: id,
                timestamp: Utc::now(),
            },
        )
        .await;

        Ok(progress)
    }

    /// Add minutes to a joined challenge
    pub async fn log_progress(
        &self,
        user: &User,
        id: ChallengeId,
        minutes: i32,
    ) -> Result<ChallengeProgress, AppError> {
        if minutes <= 0 {
            return Err(DomainError::Validation("Minutes must be positive".to_string()).into());
        }
        let challenge = self.find_challenge(&id).await?;
        self.require_joined(user, &id).await?;

        let progress = self.challenges.add_minutes(&user.id, &id, minutes).await?;
        self.settle(user, &challenge, progress).await
    }

    pub async fn progress(&self, user: &User, id: ChallengeId) -> Result<ChallengeProgress, AppError> {
        self.find_challenge(&id).await?;
        self.require_joined(user, &id).await
    }

    pub async fn badges(&self, user: &User) -> Result<Vec<Badge>, AppError> {
        Ok(self.badges.find_by_user(&user.id).await?)
    }

    /// Credit a freshly logged session to every joined challenge running on
    /// its date; returns the names of badges awarded as a result
    pub async fn credit_session(
        &self,
        user: &User,
        session: &MeditationSession,
    ) -> Result<Vec<String>, AppError> {
        let mut awarded = Vec::new();

        for (challenge, progress) in self.challenges.find_joined(&user.id).await? {
            if progress.is_completed() || !challenge.is_active_on(session.session_date) {
                continue;
            }
            let progress = self
                .challenges
                .add_minutes(&user.id, &challenge.id, session.duration_minutes)
                .await?;
            let progress = self.settle(user, &challenge, progress).await?;
            if progress.is_completed() {
                awarded.push(challenge.name.clone());
            }
        }

        Ok(awarded)
    }

    /// Mark the challenge completed and award its badge once every goal is met
    async fn settle(
        &self,
        user: &User,
        challenge: &Challenge,
        mut progress: ChallengeProgress,
    ) -> Result<ChallengeProgress, AppError> {
        if progress.is_completed() {
            return Ok(progress);
        }

        let streak = match challenge.target_days {
            Some(_) => {
                let sessions = self.sessions.find_by_user(&user.id).await?;
                current_streak(
                    sessions
                        .iter()
                        .map(|s| s.session_date)
                        .filter(|d| challenge.is_active_on(*d)),
                )
            }
            None => 0,
        };

        if !challenge.is_completed(progress.minutes, streak) {
            return Ok(progress);
        }

        let now = Utc::now();
        self.challenges
            .mark_completed(&user.id, &challenge.id, now)
            .await?;
        progress.completed_at = Some(now);

        if self.badges.award(&user.id, &challenge.name).await? {
            tracing::info!(user = %user.id, badge = %challenge.name, "Awarded badge");
            track_quietly(
                self.analytics.as_ref(),
                UsageEvent::BadgeAwarded {
                    user_id: user.id,
                    badge: challenge.name.clone(),
                    timestamp: now,
                },
            )
            .await;
        }

        Ok(progress)
    }

    async fn find_challenge(&self, id: &ChallengeId) -> Result<Challenge, AppError> {
        self.challenges
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Challenge {}", id)).into())
    }

    async fn require_joined(
        &self,
        user: &User,
        id: &ChallengeId,
    ) -> Result<ChallengeProgress, AppError> {
        self.challenges
            .find_progress(&user.id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Challenge {} not joined", id)))
    }
}
