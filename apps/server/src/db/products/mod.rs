//! Product listing: filter parsing, SQL compilation and the PostgreSQL store

pub mod filter;
pub mod params;
pub mod query_builder;
mod store;

pub use filter::ProductFilter;
pub use params::{AccessLevel, ProductQuery};
pub use query_builder::{BindValue, BuiltQuery, QueryBuilder};
pub use store::PostgresProductStore;
