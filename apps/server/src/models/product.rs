//! Product catalog records as served by the listing API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::protection::DegreeOfProtection;

/// Product (and category) identifier.
///
/// Identifiers are canonical UUIDs. Their ordering is the byte ordering of the
/// UUID, which is also how PostgreSQL orders `uuid` columns, so an id can be
/// used directly as a keyset pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse a caller-supplied identifier, returning `None` when malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// A catalog product (connector, cable, accessory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub manufacturer_part_number: Option<String>,
    pub category_id: Option<ProductId>,
    pub connector_type: Option<String>,
    pub code: Option<String>,
    pub degree_of_protection: Vec<DegreeOfProtection>,
    pub pins: Option<i32>,
    pub gender: Option<String>,
    pub in_stock: bool,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
