//! Dashboard handlers

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::wants_json;
use crate::app::SessionAnalytics;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::feed::render_dashboard;
use crate::AppState;

/// Sessions listed under the text dashboard
const RECENT_SESSIONS: usize = 5;

/// GET /dashboard
///
/// Totals and streak. The text rendering also lists the most recent sessions.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let stats = state.dashboard_service.dashboard(&user).await?;

    if wants_json(&headers) {
        return Ok(Json(stats).into_response());
    }

    let mut recent = state.session_service.list_sessions(&user).await?;
    recent.truncate(RECENT_SESSIONS);

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_dashboard(&stats, &recent),
    )
        .into_response())
}

/// GET /analytics
pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<SessionAnalytics>, AppError> {
    Ok(Json(state.dashboard_service.analytics(&user).await?))
}
