//! Process-wide PostgreSQL connection pool.
//!
//! The pool is created on first use rather than at startup, so the server can
//! bind its listener (and answer liveness checks) while the database is still
//! coming up. A failed connection attempt is not cached: the next caller
//! retries. [`DatabasePool::close`] drains the pool on shutdown.

use crate::config::DatabaseConfig;
use crate::{Error, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use std::time::Duration;
use tokio::sync::OnceCell;

pub struct DatabasePool {
    config: DatabaseConfig,
    pool: OnceCell<PgPool>,
}

impl DatabasePool {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Wrap an already-connected pool (used by the live-database tests).
    pub fn from_pool(config: DatabaseConfig, pool: PgPool) -> Self {
        Self {
            config,
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    /// Get the pool, connecting on first use.
    pub async fn get(&self) -> Result<&PgPool> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    /// (size, idle) when connected.
    pub fn stats(&self) -> Option<(u32, usize)> {
        self.pool.get().map(|pool| (pool.size(), pool.num_idle()))
    }

    /// Close all connections. Queries issued afterwards fail with `StoreUnavailable`.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            tracing::info!("Closing database pool");
            pool.close().await;
        }
    }

    async fn connect(&self) -> Result<PgPool> {
        let statement_timeout = self.config.statement_timeout_seconds;

        tracing::info!(
            max_connections = self.config.pool_max_size,
            min_connections = self.config.pool_min_size,
            "Connecting database pool"
        );

        PgPoolOptions::new()
            .max_connections(self.config.pool_max_size)
            .min_connections(self.config.pool_min_size)
            .acquire_timeout(Duration::from_secs(self.config.pool_timeout_seconds))
            .idle_timeout(Some(Duration::from_secs(self.config.idle_timeout_seconds)))
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if statement_timeout > 0 {
                        let stmt = format!("SET statement_timeout = '{}s'", statement_timeout);
                        conn.execute(stmt.as_str()).await?;
                    }
                    Ok(())
                })
            })
            .connect(&self.config.url)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to connect database pool");
                Error::StoreUnavailable(format!("failed to connect: {e}"))
            })
    }
}
