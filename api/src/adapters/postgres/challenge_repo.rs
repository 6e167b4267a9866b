//! PostgreSQL adapter for ChallengeRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Challenge, ChallengeId, ChallengeProgress, NewChallenge, UserId};
use crate::domain::ports::ChallengeRepository;
use crate::entity::{challenge_progress, challenges};
use crate::error::DomainError;

/// PostgreSQL implementation of ChallengeRepository
pub struct PostgresChallengeRepository {
    db: DatabaseConnection,
}

impl PostgresChallengeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_progress(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
    ) -> Result<ChallengeProgress, DomainError> {
        self.find_progress(user_id, challenge_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Progress in {}", challenge_id)))
    }
}

#[async_trait]
impl ChallengeRepository for PostgresChallengeRepository {
    async fn create(&self, challenge: &NewChallenge) -> Result<Challenge, DomainError> {
        let model = challenges::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(challenge.name.clone()),
            target_minutes: Set(challenge.target_minutes),
            target_days: Set(challenge.target_days),
            start_date: Set(challenge.start_date),
            end_date: Set(challenge.end_date),
            is_private: Set(challenge.is_private),
            creator_id: Set(challenge.creator_id.map(|id| id.0)),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &ChallengeId) -> Result<Option<Challenge>, DomainError> {
        let result = challenges::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_community(&self) -> Result<Vec<Challenge>, DomainError> {
        let results = challenges::Entity::find()
            .filter(challenges::Column::IsPrivate.eq(false))
            .order_by_asc(challenges::Column::StartDate)
            .order_by_asc(challenges::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_private_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Challenge>, DomainError> {
        let results = challenges::Entity::find()
            .filter(challenges::Column::IsPrivate.eq(true))
            .filter(challenges::Column::CreatorId.eq(creator.0))
            .order_by_asc(challenges::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn join(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
    ) -> Result<ChallengeProgress, DomainError> {
        let model = challenge_progress::ActiveModel {
            user_id: Set(user_id.0),
            challenge_id: Set(challenge_id.0),
            minutes: Set(0),
            joined_at: Set(Utc::now().fixed_offset()),
            completed_at: Set(None),
        };

        challenge_progress::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    challenge_progress::Column::UserId,
                    challenge_progress::Column::ChallengeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.require_progress(user_id, challenge_id).await
    }

    async fn find_progress(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
    ) -> Result<Option<ChallengeProgress>, DomainError> {
        let result = challenge_progress::Entity::find_by_id((user_id.0, challenge_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_joined(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(Challenge, ChallengeProgress)>, DomainError> {
        let results = challenge_progress::Entity::find()
            .filter(challenge_progress::Column::UserId.eq(user_id.0))
            .order_by_asc(challenge_progress::Column::JoinedAt)
            .find_also_related(challenges::Entity)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results
            .into_iter()
            .filter_map(|(progress, challenge)| {
                challenge.map(|c| (c.into(), progress.into()))
            })
            .collect())
    }

    async fn add_minutes(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
        minutes: i32,
    ) -> Result<ChallengeProgress, DomainError> {
        // Increment in place so concurrent sessions do not lose minutes
        let result = challenge_progress::Entity::update_many()
            .col_expr(
                challenge_progress::Column::Minutes,
                Expr::col(challenge_progress::Column::Minutes).add(minutes),
            )
            .filter(challenge_progress::Column::UserId.eq(user_id.0))
            .filter(challenge_progress::Column::ChallengeId.eq(challenge_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "Progress in {}",
                challenge_id
            )));
        }

        self.require_progress(user_id, challenge_id).await
    }

    async fn mark_completed(
        &self,
        user_id: &UserId,
        challenge_id: &ChallengeId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        challenge_progress::Entity::update_many()
            .col_expr(
                challenge_progress::Column::CompletedAt,
                Expr::value(at.fixed_offset()),
            )
            .filter(challenge_progress::Column::UserId.eq(user_id.0))
            .filter(challenge_progress::Column::ChallengeId.eq(challenge_id.0))
            .filter(challenge_progress::Column::CompletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<challenges::Model> for Challenge {
    fn from(model: challenges::Model) -> Self {
        Challenge {
            id: ChallengeId(model.id),
            name: model.name,
            target_minutes: model.target_minutes,
            target_days: model.target_days,
            start_date: model.start_date,
            end_date: model.end_date,
            is_private: model.is_private,
            creator_id: model.creator_id.map(UserId),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<challenge_progress::Model> for ChallengeProgress {
    fn from(model: challenge_progress::Model) -> Self {
        ChallengeProgress {
            user_id: UserId(model.user_id),
            challenge_id: ChallengeId(model.challenge_id),
            minutes: model.minutes,
            completed_at: model.completed_at.map(|at| at.with_timezone(&Utc)),
        }
    }
}
