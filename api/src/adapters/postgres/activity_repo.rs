//! PostgreSQL adapter for ActivityRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::entities::{Activity, ActivityId, ActivityKind, NewActivity, UserId};
use crate::domain::ports::ActivityRepository;
use crate::entity::activities;
use crate::error::DomainError;

/// PostgreSQL implementation of ActivityRepository
pub struct PostgresActivityRepository {
    db: DatabaseConnection,
}

impl PostgresActivityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn append(&self, activity: &NewActivity) -> Result<Activity, DomainError> {
        let model = activities::ActiveModel {
            id: NotSet,
            actor_id: Set(activity.actor_id.0),
            kind: Set(activity.kind.to_string()),
            message: Set(activity.message.clone()),
            occurred_at: Set(activity.occurred_at.fixed_offset()),
            target_id: Set(activity.target_id.map(|id| id.0)),
            related_id: Set(activity.related_id.map(|id| id.0)),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Activity::try_from(result)
    }

    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        let result = activities::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Activity::try_from).transpose()
    }

    async fn find_recent_by_actor(
        &self,
        actor: &UserId,
        limit: u64,
    ) -> Result<Vec<Activity>, DomainError> {
        let results = activities::Entity::find()
            .filter(activities::Column::ActorId.eq(actor.0))
            .order_by_desc(activities::Column::OccurredAt)
            .order_by_desc(activities::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Activity::try_from).collect()
    }
}

/// Convert SeaORM model to domain entity
///
/// An unrecognised `kind` column is reported rather than guessed.
impl TryFrom<activities::Model> for Activity {
    type Error = DomainError;

    fn try_from(model: activities::Model) -> Result<Self, Self::Error> {
        let kind: ActivityKind = model.kind.parse().map_err(|e: String| {
            tracing::error!(activity = model.id, kind = %model.kind, "Corrupt activity row");
            DomainError::Internal(e)
        })?;

        Ok(Activity {
            id: ActivityId(model.id),
            actor_id: UserId(model.actor_id),
            kind,
            message: model.message,
            occurred_at: model.occurred_at.with_timezone(&Utc),
            target_id: model.target_id.map(UserId),
            related_id: model.related_id.map(ActivityId),
        })
    }
}
