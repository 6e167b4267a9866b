//! Challenge handlers
//!
//! Community and private challenges, progress tracking and badges.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::ChallengeInput;
use crate::domain::entities::{Badge, Challenge, ChallengeId, ChallengeProgress, User};
use crate::error::AppError;
use crate::AppState;

/// POST /challenges
pub async fn create_challenge(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(input): Json<ChallengeInput>,
) -> Result<(StatusCode, Json<Challenge>), AppError> {
    let challenge = state.challenge_service.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(challenge)))
}

/// GET /challenges
pub async fn list_community(
    State(state): State<AppState>,
) -> Result<Json<Vec<Challenge>>, AppError> {
    Ok(Json(state.challenge_service.community().await?))
}

/// GET /challenges/private
pub async fn list_private(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Challenge>>, AppError> {
    Ok(Json(state.challenge_service.private_challenges(&user).await?))
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub challenge_id: Uuid,
}

/// POST /challenges/join
pub async fn join_challenge(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<ChallengeProgress>, AppError> {
    let progress = state
        .challenge_service
        .join(&user, ChallengeId(request.challenge_id))
        .await?;
    Ok(Json(progress))
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub minutes: i32,
}

/// POST /challenges/:id/progress
pub async fn log_progress(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<ChallengeProgress>, AppError> {
    let progress = state
        .challenge_service
        .log_progress(&user, ChallengeId(id), request.minutes)
        .await?;
    Ok(Json(progress))
}

/// GET /challenges/:id/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChallengeProgress>, AppError> {
    Ok(Json(
        state
            .challenge_service
            .progress(&user, ChallengeId(id))
            .await?,
    ))
}

/// GET /badges
pub async fn list_badges(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Badge>>, AppError> {
    Ok(Json(state.challenge_service.badges(&user).await?))
}
