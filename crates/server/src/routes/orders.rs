//! Order routes: history, detail, checkout, and the admin status control.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;

use lamore_core::{AddressId, OrderId, OrderStatus, PaymentMethod, ProductId};

use crate::db::addresses::AddressRepository;
use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{Order, OrderDetail, session_keys};
use crate::services::checkout::{CheckoutLine, CheckoutRequest, CheckoutService};
use crate::state::AppState;

/// One requested line in a checkout payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub address_id: AddressId,
    pub payment_method: PaymentMethod,
    pub items: Vec<PlaceOrderItem>,
    pub notes: Option<String>,
}

/// Request body for setting an order's status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// List orders, newest first. Admins see every order, customers their own.
///
/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.pool());
    let orders = if user.role.is_admin() {
        repo.list_all().await?
    } else {
        repo.list_for_user(user.id).await?
    };

    Ok(Json(orders))
}

/// Get an order with its line items and delivery address.
///
/// GET /api/orders/{id}
///
/// A non-admin asking for someone else's order gets `NOT_FOUND`.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    let repo = OrderRepository::new(state.pool());

    let order = repo
        .get_by_id(id)
        .await?
        .filter(|o| user.role.is_admin() || o.user_id == user.id)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let items = repo.items(order.id).await?;
    let address = AddressRepository::new(state.pool())
        .get_by_id(order.address_id)
        .await?;

    Ok(Json(OrderDetail {
        order,
        items,
        address,
    }))
}

/// Place an order from the given items (checkout).
///
/// POST /api/orders
///
/// On success the caller's session cart is emptied.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let request = CheckoutRequest {
        address_id: req.address_id,
        payment_method: req.payment_method,
        lines: req
            .items
            .iter()
            .map(|i| CheckoutLine {
                product_id: i.product_id,
                quantity: i.quantity,
            })
            .collect(),
        notes: req.notes.filter(|n| !n.trim().is_empty()),
    };

    let order = CheckoutService::new(state.pool())
        .place_order(user.id, &request)
        .await?;

    // Session cart mirrors the client cart; empty it on success.
    let _ = session
        .remove::<lamore_core::cart::Cart>(session_keys::CART)
        .await;

    tracing::info!(order_id = %order.id, total = %order.total, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// Set an order's status.
///
/// PATCH /api/orders/{id}/status (admin)
#[tracing::instrument(skip_all, fields(order_id = %id, status = %req.status))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, req.status)
        .await?;

    Ok(Json(order))
}
