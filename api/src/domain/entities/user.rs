//! User domain entity
//!
//! Represents a person using Mindful Connect, along with their public profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    /// Missing for accounts created through a social login provider
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub bio: String,
    pub photo_url: Option<String>,
    /// Whether other users may see this profile and its activity
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check whether `viewer` may see this user's profile
    pub fn visible_to(&self, viewer: &UserId) -> bool {
        self.is_public || self.id == *viewer
    }

    /// Name shown to other users: display name, then the id
    ///
    /// Never the email address.
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub bio: String,
    pub photo_url: Option<String>,
    pub is_public: bool,
}

/// A link between a user and an external login provider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SocialIdentity {
    pub provider: String,
    pub provider_user_id: String,
}

impl SocialIdentity {
    pub fn new(provider: &str, provider_user_id: &str) -> Self {
        Self {
            provider: provider.trim().to_lowercase(),
            provider_user_id: provider_user_id.trim().to_string(),
        }
    }
}
