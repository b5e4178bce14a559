//! Operational routes: liveness, readiness and Prometheus scraping

use crate::api::handlers::{health, metrics};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn ops_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/metrics", get(metrics::metrics_handler))
}
