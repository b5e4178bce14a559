//! Product catalog routes
//!
//! Mounted under `/api`. Both trailing-slash forms are registered so
//! storefront clients need no redirect.

use crate::api::handlers::products;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/products/", get(products::list_products))
        .route("/products/:id", get(products::get_product))
}
