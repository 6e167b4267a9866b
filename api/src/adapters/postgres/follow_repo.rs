//! PostgreSQL adapter for FollowRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::domain::entities::UserId;
use crate::domain::ports::FollowRepository;
use crate::entity::follows;
use crate::error::DomainError;

/// PostgreSQL implementation of FollowRepository
pub struct PostgresFollowRepository {
    db: DatabaseConnection,
}

impl PostgresFollowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn follow(&self, follower: &UserId, followed: &UserId) -> Result<(), DomainError> {
        let model = follows::ActiveModel {
            follower_id: Set(follower.0),
            followed_id: Set(followed.0),
            created_at: Set(Utc::now().fixed_offset()),
        };

        follows::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([follows::Column::FollowerId, follows::Column::FollowedId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn unfollow(&self, follower: &UserId, followed: &UserId) -> Result<(), DomainError> {
        follows::Entity::delete_many()
            .filter(follows::Column::FollowerId.eq(follower.0))
            .filter(follows::Column::FollowedId.eq(followed.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn followers(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let results = follows::Entity::find()
            .filter(follows::Column::FollowedId.eq(user_id.0))
            .order_by_asc(follows::Column::FollowerId)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| UserId(m.follower_id)).collect())
    }

    async fn following(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let results = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(user_id.0))
            .order_by_asc(follows::Column::FollowedId)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| UserId(m.followed_id)).collect())
    }
}
