#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use parking_api::config::ServerConfig;
use parking_api::router::build_app_router;
use parking_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused-in-tests".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Identical to the production stack in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    build_app_router(state).unwrap()
}

/// Send a `GET` request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert a zone and return its id.
pub async fn insert_zone(pool: &PgPool, name: &str) -> i32 {
    let (id,): (i32,) =
        sqlx::query_as("INSERT INTO parking.zones (zone_name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap();
    id
}

/// Insert a slot in the given zone.
pub async fn insert_slot(pool: &PgPool, zone_id: i32, slot_number: i32, occupied: bool) {
    sqlx::query(
        "INSERT INTO parking.slots (zone_id, slot_number, is_occupied) VALUES ($1, $2, $3)",
    )
    .bind(zone_id)
    .bind(slot_number)
    .bind(occupied)
    .execute(pool)
    .await
    .unwrap();
}
