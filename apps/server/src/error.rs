//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// PostgreSQL SQLSTATE for `undefined_column`.
const PG_UNDEFINED_COLUMN: &str = "42703";
/// PostgreSQL SQLSTATE for `undefined_table`.
const PG_UNDEFINED_TABLE: &str = "42P01";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A column the query relies on does not exist in the store.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The product table (or a joined table) does not exist in the store.
    #[error("Table missing: {0}")]
    TableMissing(String),

    #[error("Product store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some(PG_UNDEFINED_COLUMN) => Some(Error::SchemaMismatch(message)),
                    Some(PG_UNDEFINED_TABLE) => Some(Error::TableMissing(message)),
                    _ => None,
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Some(Error::StoreUnavailable(err.to_string()))
            }
            _ => None,
        };
        classified.unwrap_or(Error::Database(err))
    }
}

impl Error {
    /// Machine-readable code included in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Database(_) => "database-error",
            Error::SchemaMismatch(_) => "schema-mismatch",
            Error::TableMissing(_) => "table-missing",
            Error::StoreUnavailable(_) => "store-unavailable",
            Error::ProductNotFound(_) => "not-found",
            Error::Internal(_) | Error::Other(_) => "internal-error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::ProductNotFound(_) => StatusCode::NOT_FOUND,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Database(_)
            | Error::SchemaMismatch(_)
            | Error::TableMissing(_)
            | Error::Internal(_)
            | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Error::ProductNotFound(_) => self.to_string(),
            Error::SchemaMismatch(_) => {
                tracing::error!(error = %self, "Product store schema does not match queries");
                "Product store schema mismatch".to_string()
            }
            Error::TableMissing(_) => {
                tracing::error!(error = %self, "Product store table is missing");
                "Product store table missing".to_string()
            }
            Error::StoreUnavailable(_) => {
                tracing::error!(error = %self, "Product store unavailable");
                "Product store unavailable".to_string()
            }
            Error::Database(_) | Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
