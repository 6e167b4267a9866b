//! Reminder handlers
//!
//! Daily meditation reminders, exposed under /notifications.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{Reminder, ReminderId, User};
use crate::error::AppError;
use crate::AppState;

fn default_enabled() -> bool {
    true
}

/// Request body for POST /notifications
#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    /// Local time of day, `HH:MM` or `HH:MM:SS`
    pub reminder_time: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// POST /notifications
pub async fn create_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<Reminder>), AppError> {
    let reminder = state
        .reminder_service
        .add(
            &user,
            &request.reminder_time,
            &request.message,
            request.enabled,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// GET /notifications
pub async fn list_reminders(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Reminder>>, AppError> {
    Ok(Json(state.reminder_service.list(&user).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateReminderRequest {
    pub enabled: bool,
}

/// PATCH /notifications/:id
pub async fn update_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReminderRequest>,
) -> Result<Json<Reminder>, AppError> {
    let reminder = state
        .reminder_service
        .set_enabled(&user, ReminderId(id), request.enabled)
        .await?;
    Ok(Json(reminder))
}

/// DELETE /notifications/:id
pub async fn delete_reminder(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.reminder_service.remove(&user, ReminderId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
