//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

use axum::http::{header, HeaderMap};

pub mod auth;
pub mod challenges;
pub mod dashboard;
pub mod feed;
pub mod notifications;
pub mod profiles;
pub mod sessions;
pub mod social;
pub mod subscriptions;

pub use auth::{login, signup, social_signup};
pub use challenges::{
    create_challenge, get_progress, join_challenge, list_badges, list_community, list_private,
    log_progress,
};
pub use dashboard::{get_analytics, get_dashboard};
pub use feed::{get_feed, post_comment, post_encouragement};
pub use notifications::{create_reminder, delete_reminder, list_reminders, update_reminder};
pub use profiles::{get_me, get_profile, get_stats, update_bio, update_photo, update_visibility};
pub use sessions::{create_session, create_type, list_moods, list_sessions, list_types};
pub use social::{follow, list_followers, list_following, unfollow};
pub use subscriptions::{get_subscription, subscribe};

/// Check if the client wants JSON response
pub(crate) fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}
