//! PostgreSQL adapter for SubscriptionRepository

use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};

use crate::domain::entities::{Subscription, Tier, UserId};
use crate::domain::ports::SubscriptionRepository;
use crate::entity::subscriptions;
use crate::error::DomainError;

/// PostgreSQL implementation of SubscriptionRepository
pub struct PostgresSubscriptionRepository {
    db: DatabaseConnection,
}

impl PostgresSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        let result = subscriptions::Entity::find_by_id(user_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let model = subscriptions::ActiveModel {
            user_id: Set(subscription.user_id.0),
            tier: Set(subscription.tier.to_string()),
            start_date: Set(subscription.start_date),
            end_date: Set(subscription.end_date),
        };

        subscriptions::Entity::insert(model)
            .on_conflict(
                OnConflict::column(subscriptions::Column::UserId)
                    .update_columns([
                        subscriptions::Column::Tier,
                        subscriptions::Column::StartDate,
                        subscriptions::Column::EndDate,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<subscriptions::Model> for Subscription {
    fn from(model: subscriptions::Model) -> Self {
        Subscription {
            user_id: UserId(model.user_id),
            tier: model.tier.parse().unwrap_or(Tier::Free),
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}
