//! Auth service
//!
//! Handles signup, social signup, login and bearer token resolution.

use std::sync::{Arc, OnceLock};

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::domain::entities::{NewUser, SocialIdentity, User};
use crate::domain::ports::{track_quietly, AnalyticsClient, UsageEvent, UserRepository};
use crate::error::{AppError, DomainError};

type HmacSha256 = Hmac<Sha256>;

/// Shortest password we accept
pub const MIN_PASSWORD_LEN: usize = 6;

/// Service for accounts and credentials
pub struct AuthService<UR, AC>
where
    UR: UserRepository,
    AC: AnalyticsClient,
{
    users: Arc<UR>,
    analytics: Arc<AC>,
    pepper: String,
}

impl<UR, AC> AuthService<UR, AC>
where
    UR: UserRepository,
    AC: AnalyticsClient,
{
    pub fn new(users: Arc<UR>, analytics: Arc<AC>, pepper: String) -> Self {
        Self {
            users,
            analytics,
            pepper,
        }
    }

    /// Register a user with email and password
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AppError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "An account for '{}' already exists",
                email
            ))));
        }

        let new_user = NewUser {
            email: Some(email),
            password_hash: Some(hash_password(password, &self.pepper)?),
            display_name: clean_display_name(display_name),
            bio: String::new(),
            photo_url: None,
            is_public: true,
        };

        let user = self.users.create(&new_user).await?;
        tracing::info!(user_id = %user.id, "User signed up");
        self.track(UsageEvent::SignedUp {
            user_id: user.id,
            timestamp: Utc::now(),
        })
        .await;

        Ok(user)
    }

    /// Sign up or sign in through a social login provider
    ///
    /// Returns the user and a fresh bearer token. A provider identity that is
    /// already linked signs in the existing user.
    pub async fn signup_social(
        &self,
        identity: &SocialIdentity,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<(User, String), AppError> {
        if identity.provider.is_empty() || identity.provider_user_id.is_empty() {
            return Err(AppError::BadRequest(
                "Provider and provider user id are required".to_string(),
            ));
        }

        if let Some(user) = self.users.find_by_social(identity).await? {
            let token = self.issue_token(&user).await?;
            return Ok((user, token));
        }

        let email = email.map(normalize_email).transpose()?;
        if let Some(ref email) = email {
            if self.users.find_by_email(email).await?.is_some() {
                return Err(AppError::Domain(DomainError::Conflict(format!(
                    "An account for '{}' already exists; log in and link the provider instead",
                    email
                ))));
            }
        }

        let new_user = NewUser {
            email,
            password_hash: None,
            display_name: clean_display_name(display_name),
            bio: String::new(),
            photo_url: None,
            is_public: true,
        };

        let user = self.users.create(&new_user).await?;
        self.users.link_social(&user.id, identity).await?;
        tracing::info!(user_id = %user.id, provider = %identity.provider, "User signed up via social login");
        self.track(UsageEvent::SignedUp {
            user_id: user.id,
            timestamp: Utc::now(),
        })
        .await;

        let token = self.issue_token(&user).await?;
        Ok((user, token))
    }

    /// Exchange email and password for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let verified = user
            .password_hash
            .as_deref()
            .map(|stored| verify_password(stored, password, &self.pepper))
            .unwrap_or(false);
        if !verified {
            return Err(AppError::Unauthorized);
        }

        let token = self.issue_token(&user).await?;
        Ok((user, token))
    }

    /// Resolve a bearer token to its user
    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_token_hash(&hash_token(token)).await?)
    }

    async fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let token = generate_token();
        self.users.store_token(&user.id, &hash_token(&token)).await?;
        self.track(UsageEvent::LoggedIn {
            user_id: user.id,
            timestamp: Utc::now(),
        })
        .await;
        Ok(token)
    }

    async fn track(&self, event: UsageEvent) {
        track_quietly(self.analytics.as_ref(), event).await;
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// Trim, lowercase and sanity-check an email address
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if !email_regex().is_match(&email) {
        return Err(AppError::BadRequest(format!("Invalid email: {}", email)));
    }
    Ok(email)
}

fn clean_display_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Generate a random bearer token
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("mc-{}", hex::encode(bytes))
}

/// Hash a bearer token for storage
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn password_mac(salt: &[u8], password: &str, pepper: &str) -> Result<HmacSha256, DomainError> {
    let mut mac = HmacSha256::new_from_slice(pepper.as_bytes())
        .map_err(|e| DomainError::Internal(format!("Invalid HMAC key: {}", e)))?;
    mac.update(salt);
    mac.update(password.as_bytes());
    Ok(mac)
}

/// Hash a password as `hex(salt)$hex(hmac)`
pub fn hash_password(password: &str, pepper: &str) -> Result<String, DomainError> {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let digest = password_mac(&salt, password, pepper)?
        .finalize()
        .into_bytes();
    Ok(format!("{}${}", hex::encode(salt), hex::encode(digest)))
}

/// Check a password against a stored hash in constant time
pub fn verify_password(stored: &str, password: &str, pepper: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };
    password_mac(&salt, password, pepper)
        .map(|mac| mac.verify_slice(&expected).is_ok())
        .unwrap_or(false)
}
