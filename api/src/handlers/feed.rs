//! Feed handlers
//!
//! The activity feed and replies to feed items.
//! Supports content negotiation: Accept: application/json for JSON, otherwise text/plain.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use super::wants_json;
use crate::domain::entities::{Activity, ActivityId, User};
use crate::error::AppError;
use crate::feed::render_feed;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<u64>,
}

/// GET /feed
///
/// Returns the feed for the authenticated user.
/// - Accept: application/json → JSON response
/// - Otherwise → Plain text
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<FeedQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let feed = state.feed_service.generate_feed(&user, query.limit).await?;

    if wants_json(&headers) {
        Ok(Json(feed).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_feed(&feed),
        )
            .into_response())
    }
}

/// Request body for replies to a feed item
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
}

/// POST /feed/:id/comments
pub async fn post_comment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(request): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    let activity = state
        .feed_service
        .comment(&user, ActivityId(id), &request.message)
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// POST /feed/:id/encouragements
pub async fn post_encouragement(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(request): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    let activity = state
        .feed_service
        .encourage(&user, ActivityId(id), &request.message)
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}
