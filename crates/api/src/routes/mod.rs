pub mod health;
pub mod slots;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /slots/overview                                  slot overview (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/slots", slots::router())
}
