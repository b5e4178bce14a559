//! PostgreSQL-backed product store.

use super::filter::ProductFilter;
use super::query_builder::{BindValue, BuiltQuery, QueryBuilder};
use crate::db::pool::DatabasePool;
use crate::db::traits::ProductStore;
use crate::models::{protection, Product, ProductId};
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryScalar};
use sqlx::{Postgres, Row};
use std::sync::Arc;
use uuid::Uuid;

/// Product store reading from the `products` table.
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: Arc<DatabasePool>,
}

impl PostgresProductStore {
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        cursor: Option<ProductId>,
        fetch: usize,
    ) -> Result<Vec<Product>> {
        let BuiltQuery { sql, values } = QueryBuilder::from_filter(filter)
            .with_cursor(cursor)
            .build_page_sql(fetch)?;
        tracing::debug!(sql = %sql, binds = values.len(), "Executing product page query");

        let pool = self.pool.get().await?;
        let rows = bind_query(sqlx::query(&sql), values).fetch_all(pool).await?;

        rows.iter()
            .map(product_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(crate::Error::from)
    }

    async fn count(&self, filter: &ProductFilter) -> Result<i64> {
        let BuiltQuery { sql, values } = QueryBuilder::from_filter(filter).build_count_sql()?;
        tracing::debug!(sql = %sql, binds = values.len(), "Executing product count query");

        let pool = self.pool.get().await?;
        let total = bind_scalar(sqlx::query_scalar::<_, i64>(&sql), values)
            .fetch_one(pool)
            .await?;

        Ok(total)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        let BuiltQuery { sql, values } = QueryBuilder::build_get_sql(id);

        let pool = self.pool.get().await?;
        let row = bind_query(sqlx::query(&sql), values)
            .fetch_optional(pool)
            .await?;

        row.as_ref()
            .map(product_from_row)
            .transpose()
            .map_err(crate::Error::from)
    }

    async fn ping(&self) -> Result<()> {
        let pool = self.pool.get().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

fn bind_query<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    values: Vec<BindValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in values {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::Uuid(v) => query.bind(v),
            BindValue::Int(v) => query.bind(v),
            BindValue::BigInt(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
        };
    }
    query
}

fn bind_scalar<'q>(
    mut query: QueryScalar<'q, Postgres, i64, PgArguments>,
    values: Vec<BindValue>,
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for value in values {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::Uuid(v) => query.bind(v),
            BindValue::Int(v) => query.bind(v),
            BindValue::BigInt(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
        };
    }
    query
}

fn product_from_row(row: &PgRow) -> std::result::Result<Product, sqlx::Error> {
    let ratings: Option<String> = row.try_get("degree_of_protection")?;

    Ok(Product {
        id: ProductId::new(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        sku: row.try_get("sku")?,
        description: row.try_get("description")?,
        manufacturer_part_number: row.try_get("manufacturer_part_number")?,
        category_id: row
            .try_get::<Option<Uuid>, _>("category_id")?
            .map(ProductId::new),
        connector_type: row.try_get("connector_type")?,
        code: row.try_get("code")?,
        degree_of_protection: ratings
            .as_deref()
            .map(protection::decode_set)
            .unwrap_or_default(),
        pins: row.try_get("pins")?,
        gender: row.try_get("gender")?,
        in_stock: row.try_get("in_stock")?,
        price: row.try_get::<Option<Decimal>, _>("price")?,
        image_url: row.try_get("image_url")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
