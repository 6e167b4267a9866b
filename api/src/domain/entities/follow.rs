//! Follow relationship entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::UserId;

/// `follower_id` sees `followed_id`'s activity in their feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Follow {
    pub follower_id: UserId,
    pub followed_id: UserId,
    pub created_at: DateTime<Utc>,
}
