//! Service layer - business logic between handlers and storage

pub mod products;

pub use products::{ProductPage, ProductService};
