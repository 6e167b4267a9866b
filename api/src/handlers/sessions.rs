//! Session handlers
//!
//! Logging sessions, mood history and custom meditation types.

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{MeditationSession, MeditationType, Mood, NewSession, User};
use crate::error::AppError;
use crate::AppState;

/// Request body for POST /sessions
///
/// The date defaults to today (UTC) and the time of day to midnight.
/// Moods arrive as plain integers and are range-checked after parsing.
#[derive(Debug, Deserialize)]
pub struct LogSessionRequest {
    pub duration_minutes: i32,
    pub meditation_type: String,
    #[serde(default)]
    pub session_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_of_day: Option<NaiveTime>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub mood_before: Option<i32>,
    #[serde(default)]
    pub mood_after: Option<i32>,
}

impl LogSessionRequest {
    fn into_new_session(self) -> Result<NewSession, AppError> {
        let mood_before = self.mood_before.map(Mood::try_from).transpose()?;
        let mood_after = self.mood_after.map(Mood::try_from).transpose()?;

        Ok(NewSession {
            duration_minutes: self.duration_minutes,
            meditation_type: self.meditation_type,
            session_date: self
                .session_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            time_of_day: self.time_of_day.unwrap_or(NaiveTime::MIN),
            location: self.location.trim().to_string(),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            mood_before,
            mood_after,
        })
    }
}

/// Response for POST /sessions
#[derive(Debug, Serialize)]
pub struct LogSessionResponse {
    pub session: MeditationSession,
    /// Badges earned by challenges this session completed
    pub badges_awarded: Vec<String>,
}

/// POST /sessions
pub async fn create_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<LogSessionRequest>,
) -> Result<(StatusCode, Json<LogSessionResponse>), AppError> {
    let session = state
        .session_service
        .log_session(&user, request.into_new_session()?)
        .await?;

    let badges_awarded = state
        .challenge_service
        .credit_session(&user, &session)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LogSessionResponse {
            session,
            badges_awarded,
        }),
    ))
}

/// GET /sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<MeditationSession>>, AppError> {
    Ok(Json(state.session_service.list_sessions(&user).await?))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MoodPair {
    pub mood_before: i32,
    pub mood_after: i32,
}

/// GET /moods
pub async fn list_moods(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<MoodPair>>, AppError> {
    let moods = state.session_service.moods(&user).await?;
    Ok(Json(
        moods
            .into_iter()
            .map(|(mood_before, mood_after)| MoodPair {
                mood_before,
                mood_after,
            })
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CreateTypeRequest {
    pub name: String,
}

/// POST /meditation-types
pub async fn create_type(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateTypeRequest>,
) -> Result<(StatusCode, Json<MeditationType>), AppError> {
    let kind = state.session_service.add_type(&user, &request.name).await?;
    Ok((StatusCode::CREATED, Json(kind)))
}

/// GET /meditation-types
pub async fn list_types(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<MeditationType>>, AppError> {
    Ok(Json(state.session_service.list_types(&user).await?))
}
