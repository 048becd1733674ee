//! Checkout service.
//!
//! Turns a validated cart into a persisted order. Validation happens
//! here; the stock decrement itself is enforced again inside the order
//! repository's transaction, so a concurrent checkout can never push
//! stock negative.

use sqlx::PgPool;
use thiserror::Error;

use lamore_core::{AddressId, PaymentMethod, Price, ProductId, UserId};

use crate::db::addresses::AddressRepository;
use crate::db::orders::{NewOrder, NewOrderItem, OrderRepository};
use crate::db::products::ProductRepository;
use crate::db::RepositoryError;
use crate::models::{Order, Product};

/// Flat delivery fee charged on every order, in centavos.
pub const SHIPPING_FEE: Price = Price::from_minor_units(1500);

/// One requested line of a checkout, as sent by the client.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A full checkout request for one user.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub address_id: AddressId,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CheckoutLine>,
    pub notes: Option<String>,
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart had no lines.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// A line requested zero units.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The delivery address doesn't exist or belongs to another user.
    #[error("invalid address")]
    InvalidAddress,

    /// A requested product doesn't exist or is inactive.
    #[error("product {0} is unavailable")]
    ProductUnavailable(ProductId),

    /// Remaining stock can't cover the requested quantity.
    #[error("insufficient stock for {0}")]
    InsufficientStock(String),

    /// A price computation overflowed.
    #[error("order total overflow")]
    TotalOverflow,

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CheckoutError {
    fn from(err: RepositoryError) -> Self {
        // The conditional decrement surfaces as a conflict with the
        // product name baked into the message.
        match err {
            RepositoryError::Conflict(msg) => Self::InsufficientStock(msg),
            other => Self::Repository(other),
        }
    }
}

impl CheckoutError {
    /// The message shown to clients; repository internals are not leaked.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Repository(_) => "Unable to place order".to_owned(),
            other => other.to_string(),
        }
    }
}

/// Checkout service.
///
/// Validates the request against live catalog state, snapshots product
/// names and prices into the line items, computes totals, and hands the
/// whole thing to the order repository as one transaction.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order for the given user.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` describing the first validation failure,
    /// or the repository error if persistence fails.
    pub async fn place_order(
        &self,
        user_id: UserId,
        request: &CheckoutRequest,
    ) -> Result<Order, CheckoutError> {
        if request.lines.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }

        // Address must exist and belong to the buyer. Someone else's
        // address is reported the same as a missing one.
        let address = AddressRepository::new(self.pool)
            .get_by_id(request.address_id)
            .await?
            .filter(|a| a.is_owned_by(user_id))
            .ok_or(CheckoutError::InvalidAddress)?;

        let products = ProductRepository::new(self.pool);
        let mut items = Vec::with_capacity(request.lines.len());

        for line in &request.lines {
            if line.quantity == 0 {
                return Err(CheckoutError::ZeroQuantity);
            }

            let product = products
                .get_by_id(line.product_id)
                .await?
                .filter(|p| p.active)
                .ok_or(CheckoutError::ProductUnavailable(line.product_id))?;

            if !product.can_fulfill(line.quantity) {
                return Err(CheckoutError::InsufficientStock(product.name));
            }

            items.push(snapshot_line(&product, line.quantity)?);
        }

        let subtotal = order_subtotal(&items)?;
        let total = subtotal
            .checked_add(SHIPPING_FEE)
            .ok_or(CheckoutError::TotalOverflow)?;

        let new_order = NewOrder {
            user_id,
            address_id: address.id,
            payment_method: request.payment_method,
            subtotal,
            shipping_fee: SHIPPING_FEE,
            total,
            notes: request.notes.clone(),
        };

        let order = OrderRepository::new(self.pool)
            .create_with_items(&new_order, &items)
            .await?;

        Ok(order)
    }
}

/// Snapshot a product into a line item at its current name and price.
fn snapshot_line(product: &Product, quantity: u32) -> Result<NewOrderItem, CheckoutError> {
    let subtotal = product
        .price
        .checked_mul(quantity)
        .ok_or(CheckoutError::TotalOverflow)?;

    Ok(NewOrderItem {
        product_id: product.id,
        product_name: product.name.clone(),
        product_price: product.price,
        quantity,
        subtotal,
    })
}

/// Sum the line subtotals.
fn order_subtotal(items: &[NewOrderItem]) -> Result<Price, CheckoutError> {
    items.iter().try_fold(Price::ZERO, |acc, item| {
        acc.checked_add(item.subtotal)
            .ok_or(CheckoutError::TotalOverflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lamore_core::CategoryId;

    fn product(id: i32, name: &str, price: i64, stock: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: None,
            price: Price::from_minor_units(price),
            category_id: CategoryId::new(1),
            stock,
            image_url: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn snapshot_carries_name_and_price() {
        let p = product(7, "Cupcake de Morango", 1200, 10);
        let item = snapshot_line(&p, 2).unwrap();

        assert_eq!(item.product_name, "Cupcake de Morango");
        assert_eq!(item.product_price, Price::from_minor_units(1200));
        assert_eq!(item.subtotal, Price::from_minor_units(2400));
    }

    #[test]
    fn totals_include_flat_shipping() {
        let p = product(7, "Cupcake de Morango", 1200, 10);
        let items = vec![snapshot_line(&p, 2).unwrap()];

        let subtotal = order_subtotal(&items).unwrap();
        let total = subtotal.checked_add(SHIPPING_FEE).unwrap();

        assert_eq!(subtotal, Price::from_minor_units(2400));
        assert_eq!(total, Price::from_minor_units(3900));
    }

    #[test]
    fn subtotal_sums_multiple_lines() {
        let items = vec![
            snapshot_line(&product(1, "Cupcake de Baunilha", 1000, 5), 3).unwrap(),
            snapshot_line(&product(2, "Chocolate Belga", 1400, 5), 1).unwrap(),
        ];

        assert_eq!(
            order_subtotal(&items).unwrap(),
            Price::from_minor_units(4400)
        );
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let p = product(1, "Cupcake de Baunilha", i64::MAX, i32::MAX);
        assert!(matches!(
            snapshot_line(&p, 2),
            Err(CheckoutError::TotalOverflow)
        ));
    }

    #[test]
    fn conflict_maps_to_insufficient_stock() {
        let err: CheckoutError =
            RepositoryError::Conflict("insufficient stock for product 3".to_owned()).into();
        assert!(matches!(err, CheckoutError::InsufficientStock(_)));
    }
}
