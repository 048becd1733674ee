//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use lamore_core::{AddressId, OrderId, OrderItemId, OrderStatus, PaymentMethod, Price, ProductId, UserId};

use super::Address;

/// An order header.
///
/// `subtotal + shipping_fee = total` is established at creation and never
/// recomputed afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub address_id: AddressId,
    pub payment_method: PaymentMethod,
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub total: Price,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// A line item within an order.
///
/// `product_name` and `product_price` are purchase-time snapshots: later
/// edits to the catalog product must never alter historical orders.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Price,
    pub quantity: i32,
    pub subtotal: Price,
}

/// An order together with its line items and delivery address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub address: Option<Address>,
}
