//! Catalog server - product listing API for a B2B parts catalog
//!
//! Compiles listing filters into parameterized SQL and serves
//! cursor-paginated product pages:
//! - Keyset pagination over product ids with a lookahead row
//! - Filters on ids, category, connector type, code, IP rating, pins, gender, stock
//! - Escaped case-insensitive search
//! - Page-size caps raised only for verified admin sessions

#![allow(
    clippy::large_enum_variant, // Error carries sqlx::Error inline
)]

pub mod admin_session;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
