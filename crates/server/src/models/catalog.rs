//! Catalog domain types: categories and products.

use chrono::{DateTime, Utc};
use serde::Serialize;

use lamore_core::{CategoryId, Price, ProductId};

/// A product category (leaf reference data).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// A catalog product.
///
/// `stock` is mutated only by checkout and admin edits. `price` is the
/// live catalog price; historical orders carry their own snapshot.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: CategoryId,
    pub stock: i32,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product can be sold in the given quantity.
    #[must_use]
    pub fn can_fulfill(&self, quantity: u32) -> bool {
        self.active && i64::from(self.stock) >= i64::from(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(active: bool, stock: i32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Cupcake de Baunilha".to_owned(),
            slug: "cupcake-baunilha".to_owned(),
            description: None,
            price: Price::from_minor_units(1000),
            category_id: CategoryId::new(1),
            stock,
            image_url: None,
            active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_fulfill() {
        assert!(product(true, 5).can_fulfill(5));
        assert!(!product(true, 4).can_fulfill(5));
        assert!(!product(false, 10).can_fulfill(1));
    }
}
