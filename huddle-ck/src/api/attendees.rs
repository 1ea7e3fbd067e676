//! Attendee registration, search, and transfer endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use huddle_common::db::models::{Attendee, AttendeeRegistration, SearchResult};
use serde::{Deserialize, Serialize};

use crate::services;
use crate::{ApiResult, AppState};

/// Response for registration and check-in endpoints
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub attendee: Attendee,
    pub facilitator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<services::CheckInOutcome> for CheckInResponse {
    fn from(outcome: services::CheckInOutcome) -> Self {
        Self {
            attendee: outcome.attendee,
            facilitator_id: outcome.facilitator_id,
            warning: outcome.warning,
        }
    }
}

/// Query parameters for attendee search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Body for the transfer endpoint; `facilitator_id: null` unassigns
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub facilitator_id: Option<String>,
}

/// POST /api/attendees
///
/// Register a new attendee and check them in for today.
pub async fn register(
    State(state): State<AppState>,
    Json(data): Json<AttendeeRegistration>,
) -> ApiResult<(StatusCode, Json<CheckInResponse>)> {
    let outcome = services::register_and_check_in(
        &state.db,
        state.settings.utc_offset_minutes,
        state.settings.contact_number_policy,
        &data,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// GET /api/attendees/search?q=term
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let results = services::search_attendees(&state.db, &query.q).await?;
    Ok(Json(results))
}

/// PUT /api/attendees/:id/facilitator
///
/// Reassign an attendee to a facilitator, or unassign with a null id.
pub async fn transfer(
    State(state): State<AppState>,
    Path(attendee_id): Path<String>,
    Json(body): Json<TransferRequest>,
) -> ApiResult<StatusCode> {
    services::transfer(&state.db, &attendee_id, body.facilitator_id.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build attendee routes
pub fn attendee_routes() -> Router<AppState> {
    Router::new()
        .route("/api/attendees", post(register))
        .route("/api/attendees/search", get(search))
        .route("/api/attendees/:id/facilitator", put(transfer))
}
