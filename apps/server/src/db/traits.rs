//! Storage trait for the product catalog

use crate::{
    db::products::ProductFilter,
    models::{Product, ProductId},
    Result,
};
use async_trait::async_trait;

/// Read-only access to catalog products.
///
/// Any backend (PostgreSQL, in-memory, ...) can implement this trait. Every
/// implementation must apply the filter identically in `fetch_page` and
/// `count`, and return pages ordered by id ascending.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch up to `fetch` products matching `filter` with id strictly greater
    /// than `cursor`, ordered by id ascending.
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        cursor: Option<ProductId>,
        fetch: usize,
    ) -> Result<Vec<Product>>;

    /// Count products matching `filter`. Takes no cursor: totals do not depend
    /// on the page being viewed.
    async fn count(&self, filter: &ProductFilter) -> Result<i64>;

    /// Read one product.
    ///
    /// # Returns
    /// * `Ok(Some(product))` - Product found
    /// * `Ok(None)` - No product with that id
    async fn get(&self, id: ProductId) -> Result<Option<Product>>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<()>;
}
