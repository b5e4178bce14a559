//! API route definitions

pub mod ops;
pub mod products;
