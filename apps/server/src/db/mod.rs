//! Database layer - product store, connection pool and query compilation

pub mod memory;
pub mod pool;
pub mod products;
pub mod traits;

pub use memory::{MemoryProductStore, StoreFailure};
pub use pool::DatabasePool;
pub use products::PostgresProductStore;
pub use traits::ProductStore;
