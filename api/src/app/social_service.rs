//! Social service
//!
//! Follow relationships between users.

use std::sync::Arc;

use crate::domain::entities::{User, UserId};
use crate::domain::ports::{FollowRepository, UserRepository};
use crate::error::{AppError, DomainError};

pub struct SocialService<UR, FR>
where
    UR: UserRepository,
    FR: FollowRepository,
{
    users: Arc<UR>,
    follows: Arc<FR>,
}

impl<UR, FR> SocialService<UR, FR>
where
    UR: UserRepository,
    FR: FollowRepository,
{
    pub fn new(users: Arc<UR>, follows: Arc<FR>) -> Self {
        Self { users, follows }
    }

    /// Follow `target`; following twice is a no-op
    pub async fn follow(&self, follower: &User, target: UserId) -> Result<(), AppError> {
        if follower.id == target {
            return Err(DomainError::Validation("Cannot follow yourself".to_string()).into());
        }
        self.require_user(&target).await?;

        self.follows.follow(&follower.id, &target).await?;
        tracing::debug!(follower = %follower.id, followed = %target, "Followed user");
        Ok(())
    }

    pub async fn unfollow(&self, follower: &User, target: UserId) -> Result<(), AppError> {
        self.require_user(&target).await?;
        self.follows.unfollow(&follower.id, &target).await?;
        Ok(())
    }

    /// Users following `user_id`, ordered by id
    ///
    /// Private users other than the viewer are left out.
    pub async fn followers(&self, viewer: &User, user_id: UserId) -> Result<Vec<User>, AppError> {
        self.require_visible(viewer, &user_id).await?;
        let ids = self.follows.followers(&user_id).await?;
        self.load_visible(viewer, &ids).await
    }

    /// Users `user_id` follows, ordered by id
    pub async fn following(&self, viewer: &User, user_id: UserId) -> Result<Vec<User>, AppError> {
        self.require_visible(viewer, &user_id).await?;
        let ids = self.follows.following(&user_id).await?;
        self.load_visible(viewer, &ids).await
    }

    async fn require_user(&self, id: &UserId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User {}", id)).into())
    }

    async fn require_visible(&self, viewer: &User, id: &UserId) -> Result<User, AppError> {
        let user = self.require_user(id).await?;
        if !user.visible_to(&viewer.id) {
            return Err(DomainError::NotFound(format!("User {}", id)).into());
        }
        Ok(user)
    }

    async fn load_visible(&self, viewer: &User, ids: &[UserId]) -> Result<Vec<User>, AppError> {
        let mut users = self.users.find_by_ids(ids).await?;
        users.retain(|u| u.visible_to(&viewer.id));
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}
