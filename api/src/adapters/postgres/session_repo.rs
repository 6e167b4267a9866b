//! PostgreSQL adapter for SessionRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{MeditationSession, MeditationType, Mood, NewSession, SessionId, UserId};
use crate::domain::ports::SessionRepository;
use crate::entity::{meditation_types, sessions};
use crate::error::DomainError;

/// PostgreSQL implementation of SessionRepository
pub struct PostgresSessionRepository {
    db: DatabaseConnection,
}

impl PostgresSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(
        &self,
        user_id: &UserId,
        session: &NewSession,
    ) -> Result<MeditationSession, DomainError> {
        let model = sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.0),
            duration_minutes: Set(session.duration_minutes),
            meditation_type: Set(session.meditation_type.trim().to_string()),
            session_date: Set(session.session_date),
            time_of_day: Set(session.time_of_day),
            location: Set(session.location.clone()),
            notes: Set(session.notes.clone()),
            mood_before: Set(session.mood_before.map(|m| m.value())),
            mood_after: Set(session.mood_after.map(|m| m.value())),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<MeditationSession>, DomainError> {
        let results = sessions::Entity::find()
            .filter(sessions::Column::UserId.eq(user_id.0))
            .order_by_desc(sessions::Column::SessionDate)
            .order_by_desc(sessions::Column::TimeOfDay)
            .order_by_desc(sessions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn add_type(&self, user_id: &UserId, name: &str) -> Result<MeditationType, DomainError> {
        let model = meditation_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.0),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DomainError::AlreadyExists(format!("Type {}", name))
            }
            _ => DomainError::Database(e.to_string()),
        })?;

        Ok(MeditationType {
            id: result.id,
            user_id: UserId(result.user_id),
            name: result.name,
        })
    }

    async fn find_types(&self, user_id: &UserId) -> Result<Vec<MeditationType>, DomainError> {
        let results = meditation_types::Entity::find()
            .filter(meditation_types::Column::UserId.eq(user_id.0))
            .order_by_asc(meditation_types::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results
            .into_iter()
            .map(|m| MeditationType {
                id: m.id,
                user_id: UserId(m.user_id),
                name: m.name,
            })
            .collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<sessions::Model> for MeditationSession {
    fn from(model: sessions::Model) -> Self {
        MeditationSession {
            id: SessionId(model.id),
            user_id: UserId(model.user_id),
            duration_minutes: model.duration_minutes,
            meditation_type: model.meditation_type,
            session_date: model.session_date,
            time_of_day: model.time_of_day,
            location: model.location,
            notes: model.notes,
            // Out-of-range moods from older rows are dropped
            mood_before: model.mood_before.and_then(|m| Mood::try_from(m).ok()),
            mood_after: model.mood_after.and_then(|m| Mood::try_from(m).ok()),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
