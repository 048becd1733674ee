//! Order repository for database operations.
//!
//! Order creation is the one multi-statement write in the system: the
//! header insert, the line-item inserts, and the per-line stock decrements
//! all run inside a single transaction. The decrement is conditional
//! (`stock >= quantity`), so a concurrent checkout that would oversell
//! aborts the whole transaction instead of going negative.

use sqlx::{PgPool, Postgres, Transaction};

use lamore_core::{AddressId, OrderId, OrderStatus, PaymentMethod, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

const ORDER_COLUMNS: &str = "id, user_id, address_id, payment_method, subtotal, shipping_fee, \
     total, notes, status, created_at";

const ORDER_ITEM_COLUMNS: &str =
    "id, order_id, product_id, product_name, product_price, quantity, subtotal";

/// Input for creating an order header.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub address_id: AddressId,
    pub payment_method: PaymentMethod,
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub total: Price,
    pub notes: Option<String>,
}

/// Input for one line item, carrying the purchase-time product snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Price,
    pub quantity: u32,
    pub subtotal: Price,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List all orders, newest first (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Get the line items for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Persist an order, its line items, and the matching stock decrements
    /// in one transaction.
    ///
    /// If any product's stock is below its requested quantity at commit
    /// time, nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when a stock decrement fails,
    /// or `RepositoryError::Database` for other database errors.
    pub async fn create_with_items(
        &self,
        new: &NewOrder,
        items: &[NewOrderItem],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order: Order = sqlx::query_as(&format!(
            "INSERT INTO orders
                 (user_id, address_id, payment_method, subtotal, shipping_fee, total, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(new.address_id)
        .bind(new.payment_method)
        .bind(new.subtotal)
        .bind(new.shipping_fee)
        .bind(new.total)
        .bind(&new.notes)
        .bind(OrderStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO order_items
                     (order_id, product_id, product_name, product_price, quantity, subtotal)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(item.product_price)
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .bind(item.subtotal)
            .execute(&mut *tx)
            .await?;

            decrement_stock(&mut tx, item.product_id, item.quantity).await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    /// Set an order's status (admin transition control).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let order: Option<Order> = sqlx::query_as(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }
}

/// Conditionally decrement a product's stock within a transaction.
///
/// Zero rows affected means the remaining stock could not cover the
/// quantity; the caller's transaction must abort.
async fn decrement_stock(
    tx: &mut Transaction<'_, Postgres>,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(
        "UPDATE products SET stock = stock - $2, updated_at = now()
         WHERE id = $1 AND stock >= $2",
    )
    .bind(product_id)
    .bind(i32::try_from(quantity).unwrap_or(i32::MAX))
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::Conflict(format!(
            "insufficient stock for product {product_id}"
        )));
    }
    Ok(())
}
