//! Product listing handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Json},
    Extension,
};
use serde::Serialize;

use crate::{
    db::products::{AccessLevel, ProductQuery},
    models::{Product, ProductId},
    request_context::RequestContext,
    services::ProductPage,
    state::AppState,
    Error, Result,
};

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub limit: usize,
    /// Pass back as `cursor` to fetch the next page; null on the last page.
    pub cursor: Option<ProductId>,
    pub has_next: bool,
    pub has_prev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl From<ProductPage> for ProductListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            pagination: PaginationInfo {
                limit: page.limit,
                cursor: page.next_cursor.filter(|_| page.has_next),
                has_next: page.has_next,
                has_prev: page.has_prev,
                total: page.total,
            },
            products: page.products,
        }
    }
}

/// `GET /api/products`
pub async fn list_products(
    State(state): State<AppState>,
    access: AccessLevel,
    ctx: Option<Extension<RequestContext>>,
    items: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let items = match items {
        Ok(Query(items)) => items,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable query string; using defaults");
            Vec::new()
        }
    };

    let query = ProductQuery::from_items(&items, &state.config.products, access);
    let page = state.products.list(&query).await?;

    if let Some(Extension(ctx)) = ctx {
        tracing::debug!(
            request_id = %ctx.request_id,
            access = ?access,
            returned = page.products.len(),
            has_next = page.has_next,
            elapsed_ms = ctx.elapsed_ms(),
            "Listed products"
        );
    }

    Ok(Json(ProductListResponse::from(page)))
}

/// `GET /api/products/:id`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = ProductId::parse(&id).ok_or_else(|| Error::ProductNotFound(id.clone()))?;
    let product = state.products.get(id).await?;
    Ok(Json(product))
}
