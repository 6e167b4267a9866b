//! Subscription service

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::entities::{Subscription, Tier, User};
use crate::domain::ports::SubscriptionRepository;
use crate::error::AppError;

pub struct SubscriptionService<SR: SubscriptionRepository> {
    subscriptions: Arc<SR>,
}

impl<SR: SubscriptionRepository> SubscriptionService<SR> {
    pub fn new(subscriptions: Arc<SR>) -> Self {
        Self { subscriptions }
    }

    /// Current subscription; users who never subscribed are on the free tier
    pub async fn current(&self, user: &User) -> Result<Subscription, AppError> {
        let existing = self.subscriptions.find_by_user(&user.id).await?;
        Ok(existing.unwrap_or_else(|| Subscription {
            user_id: user.id,
            tier: Tier::Free,
            start_date: user.created_at.date_naive(),
            end_date: None,
        }))
    }

    /// Replace the subscription; `start_date` defaults to today
    pub async fn subscribe(
        &self,
        user: &User,
        tier: Tier,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Subscription, AppError> {
        let start_date = start_date.unwrap_or_else(|| Utc::now().date_naive());
        let subscription = Subscription::new(user.id, tier, start_date, end_date)?;

        self.subscriptions.upsert(&subscription).await?;
        tracing::info!(user = %user.id, tier = %tier, "Updated subscription");

        Ok(subscription)
    }
}
