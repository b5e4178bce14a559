//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and services, handling:
//! - Request extraction
//! - Service invocation
//! - Response formatting

pub mod health;
pub mod metrics;
pub mod products;

pub use health::*;
pub use metrics::*;
pub use products::*;
