//! PostgreSQL adapter for ReminderRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{NewReminder, Reminder, ReminderId, UserId};
use crate::domain::ports::ReminderRepository;
use crate::entity::reminders;
use crate::error::DomainError;

/// PostgreSQL implementation of ReminderRepository
pub struct PostgresReminderRepository {
    db: DatabaseConnection,
}

impl PostgresReminderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reminder `id` if it belongs to `user_id`
    async fn find_owned(
        &self,
        user_id: &UserId,
        id: &ReminderId,
    ) -> Result<reminders::Model, DomainError> {
        reminders::Entity::find_by_id(id.0)
            .filter(reminders::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Reminder {}", id)))
    }
}

#[async_trait]
impl ReminderRepository for PostgresReminderRepository {
    async fn create(
        &self,
        user_id: &UserId,
        reminder: &NewReminder,
    ) -> Result<Reminder, DomainError> {
        let model = reminders::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.0),
            reminder_time: Set(reminder.reminder_time),
            message: Set(reminder.message.clone()),
            enabled: Set(reminder.enabled),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Reminder>, DomainError> {
        let results = reminders::Entity::find()
            .filter(reminders::Column::UserId.eq(user_id.0))
            .order_by_asc(reminders::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn set_enabled(
        &self,
        user_id: &UserId,
        id: &ReminderId,
        enabled: bool,
    ) -> Result<Reminder, DomainError> {
        let existing = self.find_owned(user_id, id).await?;

        let mut model: reminders::ActiveModel = existing.into();
        model.enabled = Set(enabled);
        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn delete(&self, user_id: &UserId, id: &ReminderId) -> Result<(), DomainError> {
        let result = reminders::Entity::delete_many()
            .filter(reminders::Column::Id.eq(id.0))
            .filter(reminders::Column::UserId.eq(user_id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Reminder {}", id)));
        }
        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<reminders::Model> for Reminder {
    fn from(model: reminders::Model) -> Self {
        Reminder {
            id: ReminderId(model.id),
            user_id: UserId(model.user_id),
            reminder_time: model.reminder_time,
            message: model.message,
            enabled: model.enabled,
        }
    }
}
