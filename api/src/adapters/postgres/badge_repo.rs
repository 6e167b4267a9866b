//! PostgreSQL adapter for BadgeRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::domain::entities::{Badge, UserId};
use crate::domain::ports::BadgeRepository;
use crate::entity::badges;
use crate::error::DomainError;

/// PostgreSQL implementation of BadgeRepository
pub struct PostgresBadgeRepository {
    db: DatabaseConnection,
}

impl PostgresBadgeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BadgeRepository for PostgresBadgeRepository {
    async fn award(&self, user_id: &UserId, name: &str) -> Result<bool, DomainError> {
        let model = badges::ActiveModel {
            user_id: Set(user_id.0),
            name: Set(name.to_string()),
            awarded_at: Set(Utc::now().fixed_offset()),
        };

        let inserted = badges::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([badges::Column::UserId, badges::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(inserted > 0)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError> {
        let results = badges::Entity::find()
            .filter(badges::Column::UserId.eq(user_id.0))
            .order_by_asc(badges::Column::AwardedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results
            .into_iter()
            .map(|m| Badge {
                user_id: UserId(m.user_id),
                name: m.name,
                awarded_at: m.awarded_at.with_timezone(&Utc),
            })
            .collect())
    }
}
