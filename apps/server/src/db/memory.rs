//! In-memory product store.
//!
//! Evaluates [`ProductFilter::matches`] over a `BTreeMap` keyed by id, which
//! gives the same id-ascending order as the SQL store. The test suite drives
//! the API against it; the server binary always uses the SQL store.

use crate::{
    db::{products::ProductFilter, traits::ProductStore},
    models::{Product, ProductId},
    Error, Result,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Failure the store should report instead of answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    SchemaMismatch,
    TableMissing,
    Unavailable,
}

impl StoreFailure {
    fn to_error(self) -> Error {
        match self {
            StoreFailure::SchemaMismatch => {
                Error::SchemaMismatch("column p.degree_of_protection does not exist".to_string())
            }
            StoreFailure::TableMissing => {
                Error::TableMissing("relation \"products\" does not exist".to_string())
            }
            StoreFailure::Unavailable => {
                Error::StoreUnavailable("pool timed out while waiting for an open connection".to_string())
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryProductStore {
    products: RwLock<BTreeMap<ProductId, Product>>,
    failure: RwLock<Option<StoreFailure>>,
    queries: AtomicUsize,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: RwLock::new(map),
            ..Self::default()
        }
    }

    /// Make every following call fail (or recover with `None`).
    pub async fn set_failure(&self, failure: Option<StoreFailure>) {
        *self.failure.write().await = failure;
    }

    /// Number of store calls made so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    async fn begin(&self) -> Result<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match *self.failure.read().await {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        cursor: Option<ProductId>,
        fetch: usize,
    ) -> Result<Vec<Product>> {
        self.begin().await?;
        let products = self.products.read().await;
        let lower = match cursor {
            Some(cursor) => Bound::Excluded(cursor),
            None => Bound::Unbounded,
        };
        Ok(products
            .range((lower, Bound::Unbounded))
            .map(|(_, product)| product)
            .filter(|product| filter.matches(product))
            .take(fetch)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<i64> {
        self.begin().await?;
        let products = self.products.read().await;
        Ok(products.values().filter(|p| filter.matches(p)).count() as i64)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        self.begin().await?;
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        self.begin().await
    }
}
