//! Product service - cursor-paginated catalog listing
//!
//! Orchestrates listing requests by:
//! - Fetching one lookahead row beyond the page to decide `has_next`
//! - Deriving the next cursor from the last row actually returned
//! - Computing the cursor-independent total when requested

use crate::{
    db::{products::ProductQuery, traits::ProductStore},
    metrics,
    models::{Product, ProductId},
    Error, Result,
};
use std::sync::Arc;
use std::time::Instant;

/// One page of products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    /// Products ordered by id ascending, at most `limit` of them.
    pub products: Vec<Product>,
    pub limit: usize,
    pub has_next: bool,
    /// Id of the last returned product when `has_next`.
    pub next_cursor: Option<ProductId>,
    /// A valid cursor was supplied, so earlier pages exist.
    pub has_prev: bool,
    /// Matching products ignoring the cursor (only when requested).
    pub total: Option<i64>,
}

/// Product service coordinates catalog reads
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    /// List one page of products.
    ///
    /// Issues at most two store calls: the page fetch and, when
    /// `include_total` is set, the count. Either failing fails the whole
    /// request; no partial page is returned.
    #[tracing::instrument(
        name = "products.list",
        skip_all,
        fields(
            limit = query.limit,
            has_cursor = query.cursor.is_some(),
            constraints = query.filter.active_constraints(),
            include_total = query.include_total,
        )
    )]
    pub async fn list(&self, query: &ProductQuery) -> Result<ProductPage> {
        let limit = query.limit.max(1);

        let mut rows = timed("page", self.store.fetch_page(&query.filter, query.cursor, limit + 1))
            .await?;

        let has_next = rows.len() > limit;
        let next_cursor = if has_next {
            rows.truncate(limit);
            rows.last().map(|p| p.id)
        } else {
            None
        };

        let total = if query.include_total {
            Some(timed("count", self.store.count(&query.filter)).await?)
        } else {
            None
        };

        metrics::PRODUCT_PAGE_SIZE.observe(rows.len() as f64);
        tracing::debug!(returned = rows.len(), has_next, "Product page fetched");

        Ok(ProductPage {
            products: rows,
            limit,
            has_next,
            next_cursor,
            has_prev: query.cursor.is_some(),
            total,
        })
    }

    /// Read one product by id.
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        timed("get", self.store.get(id))
            .await?
            .ok_or_else(|| Error::ProductNotFound(id.to_string()))
    }
}

async fn timed<T>(
    kind: &'static str,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    let start = Instant::now();
    let result = fut.await;
    metrics::PRODUCT_QUERY_DURATION_SECONDS
        .with_label_values(&[kind])
        .observe(start.elapsed().as_secs_f64());
    if let Err(err) = &result {
        metrics::PRODUCT_QUERY_ERRORS_TOTAL
            .with_label_values(&[kind, err.code()])
            .inc();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProductsConfig;
    use crate::db::memory::{MemoryProductStore, StoreFailure};
    use crate::db::products::{AccessLevel, ProductFilter};
    use crate::models::DegreeOfProtection;
    use chrono::{DateTime, Utc};

    fn product(n: u8, connector: &str, pins: i32) -> Product {
        Product {
            id: ProductId::parse(&format!("00000000-0000-0000-0000-0000000000{n:02x}")).unwrap(),
            name: format!("{connector} connector {pins}-pin"),
            sku: format!("SKU-{n}"),
            description: None,
            manufacturer_part_number: None,
            category_id: None,
            connector_type: Some(connector.to_string()),
            code: None,
            degree_of_protection: vec![DegreeOfProtection::Ip67],
            pins: Some(pins),
            gender: None,
            in_stock: true,
            price: None,
            image_url: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn service(products: Vec<Product>) -> (ProductService, Arc<MemoryProductStore>) {
        let store = Arc::new(MemoryProductStore::with_products(products));
        (ProductService::new(store.clone()), store)
    }

    fn query(limit: usize, cursor: Option<ProductId>) -> ProductQuery {
        ProductQuery {
            filter: ProductFilter::default(),
            limit,
            cursor,
            include_total: false,
        }
    }

    #[tokio::test]
    async fn lookahead_row_sets_has_next_and_cursor() {
        let products: Vec<_> = (1..=5).map(|n| product(n, "M12", 4)).collect();
        let (service, _) = service(products.clone());

        let page = service.list(&query(2, None)).await.unwrap();
        assert_eq!(page.products, products[..2].to_vec());
        assert!(page.has_next);
        assert_eq!(page.next_cursor, Some(products[1].id));
        assert!(!page.has_prev);
    }

    #[tokio::test]
    async fn exact_fit_page_has_no_next() {
        let products: Vec<_> = (1..=2).map(|n| product(n, "M12", 4)).collect();
        let (service, _) = service(products);

        let page = service.list(&query(2, None)).await.unwrap();
        assert_eq!(page.products.len(), 2);
        assert!(!page.has_next);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn following_cursors_walks_every_row_once() {
        let products: Vec<_> = (1..=7).map(|n| product(n, "M8", 3)).collect();
        let (service, _) = service(products.clone());

        let mut seen = Vec::new();
        let mut cursor = None;
        loop {
            let page = service.list(&query(3, cursor)).await.unwrap();
            assert!(page.products.len() <= 3);
            seen.extend(page.products.iter().map(|p| p.id));
            if !page.has_next {
                break;
            }
            cursor = page.next_cursor;
        }

        let expected: Vec<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn total_ignores_cursor() {
        let products: Vec<_> = (1..=6)
            .map(|n| product(n, if n % 2 == 0 { "M12" } else { "M8" }, 4))
            .collect();
        let (service, _) = service(products.clone());

        let items = vec![
            ("connectorType".to_string(), "M12".to_string()),
            ("includeTotal".to_string(), "true".to_string()),
            ("limit".to_string(), "1".to_string()),
        ];
        let mut q = ProductQuery::from_items(&items, &ProductsConfig::default(), AccessLevel::Public);

        let first = service.list(&q).await.unwrap();
        assert_eq!(first.total, Some(3));

        q.cursor = first.next_cursor;
        let second = service.list(&q).await.unwrap();
        assert_eq!(second.total, Some(3));
        assert!(second.has_prev);
    }

    #[tokio::test]
    async fn total_skipped_unless_requested() {
        let (service, store) = service(vec![product(1, "M12", 4)]);
        let page = service.list(&query(10, None)).await.unwrap();
        assert!(page.total.is_none());
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn count_failure_fails_whole_request() {
        let (service, store) = service(vec![product(1, "M12", 4)]);
        store.set_failure(Some(StoreFailure::SchemaMismatch)).await;

        let mut q = query(10, None);
        q.include_total = true;
        let err = service.list(&q).await.unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let (service, _) = service(vec![]);
        let err = service.get(ProductId::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::ProductNotFound(_)));
    }
}
