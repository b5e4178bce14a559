//! Liveness and readiness handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::state::AppState;

/// `GET /health` - process is up. Never touches the database.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "catalog-server"
    }))
}

/// `GET /health/ready` - the product store answers a round trip.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.products.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, code = e.code(), "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "database": e.code() })),
            )
        }
    }
}
