//! Profile handlers
//!
//! Public profile views plus the owner's bio, photo and visibility settings.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::ProfileStats;
use crate::domain::entities::{User, UserId};
use crate::error::AppError;
use crate::AppState;

/// Profile as other users see it; email and timestamps stay private
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub display_name: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub is_public: bool,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone().unwrap_or_default(),
            bio: user.bio.clone(),
            photo_url: user.photo_url.clone(),
            is_public: user.is_public,
        }
    }
}

/// GET /users/me
pub async fn get_me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

/// GET /users/:id
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profile_service.view(&user, UserId(id)).await?;
    Ok(Json(ProfileResponse::from(&profile)))
}

/// GET /users/:id/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileStats>, AppError> {
    Ok(Json(state.profile_service.stats(&user, UserId(id)).await?))
}

#[derive(Debug, Deserialize)]
pub struct BioRequest {
    pub bio: String,
}

/// PUT /users/me/bio
pub async fn update_bio(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<BioRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(
        state.profile_service.update_bio(&user, &request.bio).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    pub photo_url: String,
}

/// PUT /users/me/photo
pub async fn update_photo(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<PhotoRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(
        state
            .profile_service
            .update_photo(&user, &request.photo_url)
            .await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub is_public: bool,
}

/// PUT /users/me/visibility
pub async fn update_visibility(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<VisibilityRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(
        state
            .profile_service
            .set_visibility(&user, request.is_public)
            .await?,
    ))
}
