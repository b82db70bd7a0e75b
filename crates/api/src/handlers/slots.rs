//! Handlers for the `/slots` resource.

use axum::extract::State;
use axum::Json;
use parking_db::models::slot_overview::SlotRow;
use parking_db::repositories::SlotOverviewRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/slots/overview
///
/// Return every row of `vw_slot_overview`, ordered by zone name then slot
/// number, as a bare JSON array.
pub async fn get_overview(State(state): State<AppState>) -> AppResult<Json<Vec<SlotRow>>> {
    let rows = SlotOverviewRepo::get_overview(&state.pool).await?;
    Ok(Json(rows))
}
