//! Domain models for the catalog server

pub mod product;
pub mod protection;

pub use product::{Product, ProductId};
pub use protection::DegreeOfProtection;
