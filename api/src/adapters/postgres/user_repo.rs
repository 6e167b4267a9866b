//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{NewUser, SocialIdentity, User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::{auth_tokens, social_accounts, users};
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn update(&self, model: users::ActiveModel) -> Result<(), DomainError> {
        model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound("User".to_string()),
            e => DomainError::Database(e.to_string()),
        })?;
        Ok(())
    }
}

/// Map a unique-constraint violation to `AlreadyExists`
fn conflict_or_database(e: DbErr, what: impl FnOnce() -> String) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(what()),
        _ => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let results = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            display_name: Set(user.display_name.clone()),
            bio: Set(user.bio.clone()),
            photo_url: Set(user.photo_url.clone()),
            is_public: Set(user.is_public),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            conflict_or_database(e, || {
                format!("User {}", user.email.as_deref().unwrap_or_default())
            })
        })?;

        Ok(result.into())
    }

    async fn find_by_social(&self, identity: &SocialIdentity) -> Result<Option<User>, DomainError> {
        let result = social_accounts::Entity::find_by_id((
            identity.provider.clone(),
            identity.provider_user_id.clone(),
        ))
        .find_also_related(users::Entity)
        .one(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.and_then(|(_, user)| user).map(|m| m.into()))
    }

    async fn link_social(&self, id: &UserId, identity: &SocialIdentity) -> Result<(), DomainError> {
        social_accounts::ActiveModel {
            provider: Set(identity.provider.clone()),
            provider_user_id: Set(identity.provider_user_id.clone()),
            user_id: Set(id.0),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_database(e, || format!("Social account {}", identity.provider)))?;

        Ok(())
    }

    async fn update_bio(&self, id: &UserId, bio: &str) -> Result<(), DomainError> {
        self.update(users::ActiveModel {
            id: Set(id.0),
            bio: Set(bio.to_string()),
            ..Default::default()
        })
        .await
    }

    async fn update_photo(&self, id: &UserId, photo_url: &str) -> Result<(), DomainError> {
        self.update(users::ActiveModel {
            id: Set(id.0),
            photo_url: Set(Some(photo_url.to_string())),
            ..Default::default()
        })
        .await
    }

    async fn set_visibility(&self, id: &UserId, is_public: bool) -> Result<(), DomainError> {
        self.update(users::ActiveModel {
            id: Set(id.0),
            is_public: Set(is_public),
            ..Default::default()
        })
        .await
    }

    async fn store_token(&self, id: &UserId, token_hash: &str) -> Result<(), DomainError> {
        auth_tokens::ActiveModel {
            token_hash: Set(token_hash.to_string()),
            user_id: Set(id.0),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, DomainError> {
        let result = auth_tokens::Entity::find_by_id(token_hash.to_string())
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.and_then(|(_, user)| user).map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            email: model.email,
            password_hash: model.password_hash,
            display_name: model.display_name,
            bio: model.bio,
            photo_url: model.photo_url,
            is_public: model.is_public,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
