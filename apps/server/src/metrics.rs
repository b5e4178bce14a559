//! Metrics collection for the catalog server
//!
//! This module defines and manages Prometheus metrics for monitoring the catalog API.

use axum::{extract::MatchedPath, http::Extensions};
use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, register_int_gauge,
    register_int_gauge_vec, Histogram, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "catalog_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "catalog_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "catalog_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    // Product Query Metrics

    /// Product store call duration by kind (page, count, get)
    pub static ref PRODUCT_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "catalog_product_query_duration_seconds",
        "Product store query duration in seconds",
        &["kind"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]
    )
    .expect("Failed to register PRODUCT_QUERY_DURATION_SECONDS");

    /// Product store failures by kind and error code
    pub static ref PRODUCT_QUERY_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "catalog_product_query_errors_total",
        "Total number of failed product store queries",
        &["kind", "code"]
    )
    .expect("Failed to register PRODUCT_QUERY_ERRORS_TOTAL");

    /// Products returned per listing page
    pub static ref PRODUCT_PAGE_SIZE: Histogram = register_histogram!(
        "catalog_product_page_size",
        "Number of products returned per listing page",
        vec![0.0, 1.0, 10.0, 25.0, 50.0, 100.0, 500.0, 1000.0, 10000.0]
    )
    .expect("Failed to register PRODUCT_PAGE_SIZE");

    // Database Metrics

    /// Open database connections
    pub static ref DB_CONNECTIONS_OPEN: IntGauge = register_int_gauge!(
        "catalog_db_connections_open",
        "Number of open database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_OPEN");

    /// Idle database connections
    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "catalog_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");
}

/// Label for requests that matched no route (including the 404 fallback).
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route template used as the `path` label, e.g. `/api/products/:id`.
///
/// Only templates registered on the router can appear, so label cardinality
/// is fixed by the route table rather than by what callers send.
pub fn route_label(extensions: &Extensions) -> String {
    extensions
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
