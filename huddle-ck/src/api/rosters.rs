//! Facilitator roster endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use huddle_common::db::models::FacilitatorRoster;

use crate::services;
use crate::{ApiResult, AppState};

/// GET /api/facilitators/rosters
///
/// Rosters for every facilitator active today.
pub async fn all_rosters(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<FacilitatorRoster>>> {
    let rosters =
        services::all_rosters(&state.db, state.settings.utc_offset_minutes).await?;
    Ok(Json(rosters))
}

/// GET /api/facilitators/:id/roster
pub async fn roster_for(
    State(state): State<AppState>,
    Path(facilitator_id): Path<String>,
) -> ApiResult<Json<FacilitatorRoster>> {
    let roster = services::roster_for(
        &state.db,
        state.settings.utc_offset_minutes,
        &facilitator_id,
    )
    .await?;
    Ok(Json(roster))
}

/// Build roster routes
pub fn roster_routes() -> Router<AppState> {
    Router::new()
        .route("/api/facilitators/rosters", get(all_rosters))
        .route("/api/facilitators/:id/roster", get(roster_for))
}
