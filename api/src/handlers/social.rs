//! Follow handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::profiles::ProfileResponse;
use crate::domain::entities::{User, UserId};
use crate::error::AppError;
use crate::AppState;

/// Request body for follow and unfollow
#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    pub user_id: Uuid,
}

/// POST /follow
pub async fn follow(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<FollowRequest>,
) -> Result<StatusCode, AppError> {
    state
        .social_service
        .follow(&user, UserId(request.user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /unfollow
pub async fn unfollow(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<FollowRequest>,
) -> Result<StatusCode, AppError> {
    state
        .social_service
        .unfollow(&user, UserId(request.user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/:id/followers
pub async fn list_followers(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let users = state.social_service.followers(&user, UserId(id)).await?;
    Ok(Json(users.iter().map(ProfileResponse::from).collect()))
}

/// GET /users/:id/following
pub async fn list_following(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let users = state.social_service.following(&user, UserId(id)).await?;
    Ok(Json(users.iter().map(ProfileResponse::from).collect()))
}
