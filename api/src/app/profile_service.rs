//! Profile service
//!
//! Viewing and editing user profiles.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{User, UserId};
use crate::domain::ports::{BadgeRepository, SessionRepository, UserRepository};
use crate::domain::stats::DashboardStats;
use crate::error::{AppError, DomainError};

/// Maximum bio length in characters
pub const MAX_BIO_LEN: usize = 500;

/// Public profile with meditation totals and earned badges
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStats {
    pub user_id: UserId,
    pub display_name: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub total_minutes: i64,
    pub session_count: usize,
    pub current_streak: u32,
    pub badges: Vec<String>,
}

pub struct ProfileService<UR, SR, BR>
where
    UR: UserRepository,
    SR: SessionRepository,
    BR: BadgeRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    badges: Arc<BR>,
}

impl<UR, SR, BR> ProfileService<UR, SR, BR>
where
    UR: UserRepository,
    SR: SessionRepository,
    BR: BadgeRepository,
{
    pub fn new(users: Arc<UR>, sessions: Arc<SR>, badges: Arc<BR>) -> Self {
        Self {
            users,
            sessions,
            badges,
        }
    }

    /// Profile of `user_id` as seen by `viewer`
    ///
    /// Private profiles are reported as missing to everyone but their owner.
    pub async fn view(&self, viewer: &User, user_id: UserId) -> Result<User, AppError> {
        let not_found = || DomainError::NotFound(format!("User {}", user_id));
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(not_found)?;

        if !user.visible_to(&viewer.id) {
            return Err(not_found().into());
        }
        Ok(user)
    }

    pub async fn stats(&self, viewer: &User, user_id: UserId) -> Result<ProfileStats, AppError> {
        let user = self.view(viewer, user_id).await?;
        let sessions = self.sessions.find_by_user(&user.id).await?;
        let totals = DashboardStats::from_sessions(&sessions);
        let badges = self
            .badges
            .find_by_user(&user.id)
            .await?
            .into_iter()
            .map(|b| b.name)
            .collect();

        Ok(ProfileStats {
            user_id: user.id,
            display_name: user.label(),
            bio: user.bio,
            photo_url: user.photo_url,
            total_minutes: totals.total_minutes,
            session_count: totals.session_count,
            current_streak: totals.current_streak,
            badges,
        })
    }

    pub async fn update_bio(&self, user: &User, bio: &str) -> Result<User, AppError> {
        let bio = bio.trim();
        if bio.chars().count() > MAX_BIO_LEN {
            return Err(DomainError::Validation(format!(
                "Bio must be at most {} characters",
                MAX_BIO_LEN
            ))
            .into());
        }
        self.users.update_bio(&user.id, bio).await?;
        self.reload(&user.id).await
    }

    pub async fn update_photo(&self, user: &User, photo_url: &str) -> Result<User, AppError> {
        let photo_url = photo_url.trim();
        if photo_url.is_empty() {
            return Err(AppError::BadRequest("Photo URL is required".to_string()));
        }
        self.users.update_photo(&user.id, photo_url).await?;
        self.reload(&user.id).await
    }

    /// Switch between a public and a private profile
    pub async fn set_visibility(&self, user: &User, is_public: bool) -> Result<User, AppError> {
        self.users.set_visibility(&user.id, is_public).await?;
        tracing::info!(user = %user.id, is_public, "Changed profile visibility");
        self.reload(&user.id).await
    }

    async fn reload(&self, id: &UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::ports::{BadgeRepository, SessionRepository};
    use crate::test_utils::{
        test_new_session, test_user_named, InMemoryBadgeRepository, InMemorySessionRepository,
        InMemoryUserRepository,
    };

    struct Fixture {
        service: ProfileService<InMemoryUserRepository, InMemorySessionRepository, InMemoryBadgeRepository>,
        sessions: Arc<InMemorySessionRepository>,
        badges: Arc<InMemoryBadgeRepository>,
    }

    fn fixture(users: Vec<User>) -> Fixture {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let badges = Arc::new(InMemoryBadgeRepository::new());
        Fixture {
            service: ProfileService::new(
                Arc::new(InMemoryUserRepository::new().with_users(users)),
                sessions.clone(),
                badges.clone(),
            ),
            sessions,
            badges,
        }
    }

    #[tokio::test]
    async fn private_profile_visible_only_to_owner() {
        let viewer = test_user_named("viewer");
        let mut owner = test_user_named("owner");
        owner.is_public = false;
        let f = fixture(vec![viewer.clone(), owner.clone()]);

        let result = f.service.view(&viewer, owner.id).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
        assert_eq!(f.service.view(&owner, owner.id).await.unwrap().id, owner.id);
    }

    #[tokio::test]
    async fn stats_include_totals_and_badges() {
        let viewer = test_user_named("viewer");
        let owner = test_user_named("owner");
        let f = fixture(vec![viewer.clone(), owner.clone()]);

        for day in [1, 2, 3] {
            f.sessions
                .create(
                    &owner.id,
                    &test_new_session(NaiveDate::from_ymd_opt(2023, 1, day).unwrap()),
                )
                .await
                .unwrap();
        }
        f.badges.award(&owner.id, "January Calm").await.unwrap();

        let stats = f.service.stats(&viewer, owner.id).await.unwrap();

        assert_eq!(stats.display_name, "owner");
        assert_eq!(stats.total_minutes, 60);
        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.badges, vec!["January Calm".to_string()]);
    }

    #[tokio::test]
    async fn bio_is_trimmed_and_bounded() {
        let owner = test_user_named("owner");
        let f = fixture(vec![owner.clone()]);

        let updated = f.service.update_bio(&owner, "  breathing  ").await.unwrap();
        assert_eq!(updated.bio, "breathing");

        let too_long = "a".repeat(MAX_BIO_LEN + 1);
        assert!(f.service.update_bio(&owner, &too_long).await.is_err());
    }

    #[tokio::test]
    async fn photo_and_visibility_updates() {
        let owner = test_user_named("owner");
        let f = fixture(vec![owner.clone()]);

        let updated = f
            .service
            .update_photo(&owner, "https://img.example/me.png")
            .await
            .unwrap();
        assert_eq!(updated.photo_url.as_deref(), Some("https://img.example/me.png"));
        assert!(f.service.update_photo(&owner, " ").await.is_err());

        let updated = f.service.set_visibility(&owner, false).await.unwrap();
        assert!(!updated.is_public);
    }
}
