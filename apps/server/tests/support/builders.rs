use catalog::models::{DegreeOfProtection, Product, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Id whose uuid ordering follows `n`.
pub fn product_id(n: u128) -> ProductId {
    ProductId::new(Uuid::from_u128(n))
}

/// Builder for catalog products
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    /// Start from a minimal in-stock product with id `product_id(n)`.
    pub fn new(n: u128) -> Self {
        Self {
            product: Product {
                id: product_id(n),
                name: format!("Product {n}"),
                sku: format!("SKU-{n:05}"),
                description: None,
                manufacturer_part_number: None,
                category_id: None,
                connector_type: None,
                code: None,
                degree_of_protection: Vec::new(),
                pins: None,
                gender: None,
                in_stock: true,
                price: None,
                image_url: None,
                created_at: DateTime::<Utc>::UNIX_EPOCH,
                updated_at: DateTime::<Utc>::UNIX_EPOCH,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.product.name = name.into();
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.product.sku = sku.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.product.description = Some(description.into());
        self
    }

    pub fn mpn(mut self, mpn: impl Into<String>) -> Self {
        self.product.manufacturer_part_number = Some(mpn.into());
        self
    }

    pub fn category(mut self, category: ProductId) -> Self {
        self.product.category_id = Some(category);
        self
    }

    pub fn connector(mut self, connector: impl Into<String>) -> Self {
        self.product.connector_type = Some(connector.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.product.code = Some(code.into());
        self
    }

    pub fn protection(mut self, ratings: &[DegreeOfProtection]) -> Self {
        self.product.degree_of_protection = ratings.to_vec();
        self
    }

    pub fn pins(mut self, pins: i32) -> Self {
        self.product.pins = Some(pins);
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.product.gender = Some(gender.into());
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.product.in_stock = false;
        self
    }

    pub fn price(mut self, cents: i64) -> Self {
        self.product.price = Some(Decimal::new(cents, 2));
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}
