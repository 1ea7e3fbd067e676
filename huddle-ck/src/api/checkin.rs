//! Check-in endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use huddle_common::db::models::CheckedInAttendee;
use serde::Deserialize;

use crate::api::attendees::CheckInResponse;
use crate::services;
use crate::{ApiResult, AppState};

/// Body for checking in an existing attendee
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub attendee_id: String,
}

/// POST /api/checkins
pub async fn check_in(
    State(state): State<AppState>,
    Json(body): Json<CheckInRequest>,
) -> ApiResult<(StatusCode, Json<CheckInResponse>)> {
    let outcome = services::check_in(
        &state.db,
        state.settings.utc_offset_minutes,
        &body.attendee_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// GET /api/checkins/today
pub async fn today(State(state): State<AppState>) -> ApiResult<Json<Vec<CheckedInAttendee>>> {
    let list =
        services::checked_in_today(&state.db, state.settings.utc_offset_minutes).await?;
    Ok(Json(list))
}

/// DELETE /api/checkins/:id
pub async fn undo(
    State(state): State<AppState>,
    Path(attendance_log_id): Path<String>,
) -> ApiResult<StatusCode> {
    services::undo_check_in(&state.db, &attendance_log_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build check-in routes
pub fn checkin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/checkins", post(check_in))
        .route("/api/checkins/today", get(today))
        .route("/api/checkins/:id", delete(undo))
}
