//! Account handlers
//!
//! Signup, social signup and login. These routes are rate limited and do not
//! require a bearer token.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{SocialIdentity, User};
use crate::error::AppError;
use crate::AppState;

/// Request body for email signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Request body for social signup or login
#[derive(Debug, Deserialize)]
pub struct SocialSignupRequest {
    pub provider: String,
    pub provider_user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying a freshly issued bearer token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub user: User,
    /// Bearer token for authenticated calls (Authorization: Bearer <token>)
    pub token: String,
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state
        .auth_service
        .signup(
            &request.email,
            &request.password,
            request.display_name.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/social
///
/// Creates the account on first use; later calls log the same user in.
pub async fn social_signup(
    State(state): State<AppState>,
    Json(request): Json<SocialSignupRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if request.provider.trim().is_empty() || request.provider_user_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "provider and provider_user_id are required".to_string(),
        ));
    }
    let identity = SocialIdentity::new(&request.provider, &request.provider_user_id);

    let (user, token) = state
        .auth_service
        .signup_social(
            &identity,
            request.email.as_deref(),
            request.display_name.as_deref(),
        )
        .await?;

    Ok(Json(TokenResponse { user, token }))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let (user, token) = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(TokenResponse { user, token }))
}
