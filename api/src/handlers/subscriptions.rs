//! Subscription handlers

use axum::{extract::State, Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::entities::{Subscription, Tier, User};
use crate::error::AppError;
use crate::AppState;

/// Request body for POST /subscription
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub tier: Tier,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// GET /subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Subscription>, AppError> {
    Ok(Json(state.subscription_service.current(&user).await?))
}

/// POST /subscription
pub async fn subscribe(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state
        .subscription_service
        .subscribe(&user, request.tier, request.start_date, request.end_date)
        .await?;
    Ok(Json(subscription))
}
