//! Feed service
//!
//! Builds the social feed for a viewer and posts comments and encouragements
//! onto existing feed items.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::DEFAULT_FEED_LIMIT;
use crate::domain::entities::{Activity, ActivityId, ActivityKind, NewActivity, User, UserId};
use crate::domain::feed::{compose_feed, VisibilityPolicy};
use crate::domain::ports::{ActivityRepository, FollowRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Upper bound on a single feed page
pub const MAX_FEED_LIMIT: u64 = 100;

/// A feed item with the actor's display label attached
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub activity: Activity,
    pub actor_name: String,
}

pub struct FeedService<UR, AR, FR>
where
    UR: UserRepository,
    AR: ActivityRepository,
    FR: FollowRepository,
{
    users: Arc<UR>,
    activities: Arc<AR>,
    follows: Arc<FR>,
    default_limit: u64,
}

impl<UR, AR, FR> FeedService<UR, AR, FR>
where
    UR: UserRepository,
    AR: ActivityRepository,
    FR: FollowRepository,
{
    pub fn new(users: Arc<UR>, activities: Arc<AR>, follows: Arc<FR>) -> Self {
        Self {
            users,
            activities,
            follows,
            default_limit: DEFAULT_FEED_LIMIT,
        }
    }

    pub fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = limit.clamp(1, MAX_FEED_LIMIT);
        self
    }

    /// Newest activity from the viewer and everyone they follow
    ///
    /// Activity from private profiles other than the viewer's own is left out.
    pub async fn generate_feed(
        &self,
        viewer: &User,
        limit: Option<u64>,
    ) -> Result<Vec<FeedEntry>, AppError> {
        let limit = limit.unwrap_or(self.default_limit).clamp(1, MAX_FEED_LIMIT);

        let mut authors = self.follows.following(&viewer.id).await?;
        authors.push(viewer.id);
        authors.sort();
        authors.dedup();

        let users = self.users.find_by_ids(&authors).await?;
        let policy: VisibilityPolicy = users.iter().collect();
        let names: HashMap<UserId, String> = users.iter().map(|u| (u.id, u.label())).collect();

        let mut records = HashMap::new();
        for author in &authors {
            if !policy.allows(&viewer.id, author) {
                continue;
            }
            let recent = self.activities.find_recent_by_actor(author, limit).await?;
            records.insert(*author, recent);
        }

        let mut feed = compose_feed(&viewer.id, &records, &policy);
        feed.truncate(limit as usize);

        tracing::debug!(viewer = %viewer.id, items = feed.len(), "Generated feed");

        Ok(feed
            .into_iter()
            .map(|activity| {
                let actor_name = names
                    .get(&activity.actor_id)
                    .cloned()
                    .unwrap_or_else(|| activity.actor_id.to_string());
                FeedEntry {
                    activity,
                    actor_name,
                }
            })
            .collect())
    }

    /// Comment on a feed item
    pub async fn comment(
        &self,
        viewer: &User,
        item: ActivityId,
        text: &str,
    ) -> Result<Activity, AppError> {
        self.reply(viewer, item, ActivityKind::Comment, text).await
    }

    /// Encourage the author of a feed item
    pub async fn encourage(
        &self,
        viewer: &User,
        item: ActivityId,
        text: &str,
    ) -> Result<Activity, AppError> {
        self.reply(viewer, item, ActivityKind::Encouragement, text)
            .await
    }

    async fn reply(
        &self,
        viewer: &User,
        item: ActivityId,
        kind: ActivityKind,
        text: &str,
    ) -> Result<Activity, AppError> {
        let target = self.visible_item(viewer, item).await?;
        let reply = NewActivity::reply(viewer.id, kind, text, &target)?;
        let stored = self.activities.append(&reply).await?;

        tracing::info!(
            actor = %viewer.id,
            item = %item,
            kind = %kind,
            "Posted reply"
        );

        Ok(stored)
    }

    /// Load an item, hiding those the viewer is not allowed to see
    async fn visible_item(&self, viewer: &User, item: ActivityId) -> Result<Activity, AppError> {
        let not_found = || DomainError::NotFound(format!("Feed item {}", item));

        let activity = self
            .activities
            .find_by_id(&item)
            .await?
            .ok_or_else(not_found)?;

        let author = self
            .users
            .find_by_id(&activity.actor_id)
            .await?
            .ok_or_else(not_found)?;

        if !author.visible_to(&viewer.id) {
            return Err(not_found().into());
        }

        Ok(activity)
    }
}
