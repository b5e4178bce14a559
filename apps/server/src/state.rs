//! Shared application state

use std::sync::Arc;

use crate::{
    admin_session::AdminSessionVerifier,
    config::Config,
    db::{DatabasePool, PostgresProductStore, ProductStore},
    services::products::ProductService,
};

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub products: Arc<ProductService>,
    pub admin_sessions: Arc<AdminSessionVerifier>,
    /// Present when backed by PostgreSQL; exposes pool statistics.
    pub db_pool: Option<Arc<DatabasePool>>,
}

impl AppState {
    /// Build state over any product store.
    pub fn new(config: Config, store: Arc<dyn ProductStore>) -> Self {
        let admin_sessions = Arc::new(AdminSessionVerifier::new(&config.admin));
        Self {
            config: Arc::new(config),
            products: Arc::new(ProductService::new(store)),
            admin_sessions,
            db_pool: None,
        }
    }

    /// Build state backed by PostgreSQL. The pool connects lazily on first query.
    pub fn with_postgres(config: Config) -> Self {
        let pool = Arc::new(DatabasePool::new(config.database.clone()));
        let store: Arc<dyn ProductStore> = Arc::new(PostgresProductStore::new(pool.clone()));
        let mut state = Self::new(config, store);
        state.db_pool = Some(pool);
        state
    }
}
