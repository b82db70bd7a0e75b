//! Route definitions for the `/slots` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::slots;
use crate::state::AppState;

/// Routes mounted at `/slots`.
///
/// ```text
/// GET    /overview                -> get_overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/overview", get(slots::get_overview))
}
