//! SQL query builder for product listing.
//!
//! Builds parameterized queries from a [`ProductFilter`]:
//! - one predicate per active filter, joined with `AND`
//! - optional keyset cursor (`p.id > $n`)
//! - `ORDER BY p.id ASC` with a bound `LIMIT`
//! - a `COUNT(*)` variant sharing the same predicates but never the cursor
//!
//! Predicates carry `?` markers next to the values they bind. Markers are only
//! numbered (`$1`, `$2`, ...) when the final SQL is rendered, so a fragment and
//! its values can never drift apart.

use super::filter::ProductFilter;
use crate::models::ProductId;
use uuid::Uuid;

mod bind;
mod clauses;

use bind::{count_placeholders, render_placeholders};

/// Columns selected for every product read, in row-mapping order.
pub const PRODUCT_COLUMNS: &str = "p.id, p.name, p.sku, p.description, p.manufacturer_part_number, \
     p.category_id, p.connector_type, p.code, p.degree_of_protection, p.pins, p.gender, \
     p.in_stock, p.price, p.image_url, p.created_at, p.updated_at";

const FROM_PRODUCTS: &str = "FROM products p";

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Uuid(Uuid),
    Int(i32),
    BigInt(i64),
    Bool(bool),
}

/// One parameterized boolean condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    fragment: String,
    values: Vec<BindValue>,
}

impl Predicate {
    fn new(fragment: String, values: Vec<BindValue>) -> Self {
        debug_assert_eq!(
            count_placeholders(&fragment),
            values.len(),
            "placeholder/value mismatch in `{fragment}`"
        );
        Self { fragment, values }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }
}

/// Rendered SQL text plus values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub values: Vec<BindValue>,
}

/// A fragment declared a different number of placeholders than it bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("query has {placeholders} placeholders but {values} bind values")]
pub struct PlaceholderMismatch {
    pub placeholders: usize,
    pub values: usize,
}

impl From<PlaceholderMismatch> for crate::Error {
    fn from(err: PlaceholderMismatch) -> Self {
        crate::Error::Internal(err.to_string())
    }
}

/// Query builder for product listing.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    predicates: Vec<Predicate>,
}

impl QueryBuilder {
    /// Compile every active filter into a predicate.
    pub fn from_filter(filter: &ProductFilter) -> Self {
        let mut builder = Self::default();

        builder.push_opt(clauses::id_in("p.id", &filter.ids));
        builder.push_opt(clauses::id_in("p.category_id", &filter.category_ids));
        builder.push_opt(clauses::text_in("p.connector_type", &filter.connector_types));
        builder.push_opt(clauses::text_in("p.code", &filter.codes));
        builder.push_opt(clauses::protection_overlap(
            "p.degree_of_protection",
            &filter.degrees_of_protection,
        ));
        builder.push_opt(clauses::int_in("p.pins", &filter.pins));
        builder.push_opt(clauses::text_in("p.gender", &filter.genders));
        if filter.in_stock_only {
            builder.push(clauses::is_true("p.in_stock"));
        }
        if let Some(term) = &filter.search {
            builder.push_opt(clauses::search_any(
                term,
                &["p.name", "p.sku"],
                &["p.description", "p.manufacturer_part_number"],
            ));
        }

        builder
    }

    /// Add the keyset cursor predicate.
    pub fn with_cursor(mut self, cursor: Option<ProductId>) -> Self {
        if let Some(cursor) = cursor {
            self.push(clauses::after_cursor("p.id", cursor));
        }
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    fn push_opt(&mut self, predicate: Option<Predicate>) {
        if let Some(predicate) = predicate {
            self.push(predicate);
        }
    }

    /// Render ` WHERE a AND b ...` (empty when unconstrained), numbering from `$1`.
    pub fn build_where(&self) -> Result<BuiltQuery, PlaceholderMismatch> {
        let mut sql = String::new();
        let mut values = Vec::new();
        let mut next_index = 1;

        for (i, predicate) in self.predicates.iter().enumerate() {
            let placeholders = count_placeholders(&predicate.fragment);
            if placeholders != predicate.values.len() {
                return Err(PlaceholderMismatch {
                    placeholders,
                    values: predicate.values.len(),
                });
            }
            let (rendered, next) = render_placeholders(&predicate.fragment, next_index);
            next_index = next;

            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&rendered);
            values.extend(predicate.values.iter().cloned());
        }

        Ok(BuiltQuery { sql, values })
    }

    /// Page query: `fetch` rows ordered by id ascending.
    pub fn build_page_sql(&self, fetch: usize) -> Result<BuiltQuery, PlaceholderMismatch> {
        let BuiltQuery { sql: where_sql, mut values } = self.build_where()?;
        values.push(BindValue::BigInt(fetch as i64));
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} {FROM_PRODUCTS}{where_sql} ORDER BY p.id ASC LIMIT ${}",
            values.len()
        );
        Ok(BuiltQuery { sql, values })
    }

    /// Count query over the same predicates.
    pub fn build_count_sql(&self) -> Result<BuiltQuery, PlaceholderMismatch> {
        let BuiltQuery { sql: where_sql, values } = self.build_where()?;
        Ok(BuiltQuery {
            sql: format!("SELECT COUNT(*) {FROM_PRODUCTS}{where_sql}"),
            values,
        })
    }

    /// Single product by id.
    pub fn build_get_sql(id: ProductId) -> BuiltQuery {
        BuiltQuery {
            sql: format!("SELECT {PRODUCT_COLUMNS} {FROM_PRODUCTS} WHERE p.id = $1"),
            values: vec![BindValue::Uuid(id.as_uuid())],
        }
    }

    #[cfg(test)]
    fn push_unchecked(&mut self, fragment: &str, values: Vec<BindValue>) {
        self.predicates.push(Predicate {
            fragment: fragment.to_string(),
            values,
        });
    }
}
