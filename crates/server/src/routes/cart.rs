//! Session cart routes.
//!
//! The server keeps a per-session mirror of the client cart. Product name,
//! price, and image are re-fetched from the catalog on every add, so a
//! stale client can't pin an old price into the cart (checkout re-checks
//! everything anyway).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use lamore_core::cart::{Cart, CartLine};
use lamore_core::{Price, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart response with derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Cart,
    pub item_count: u32,
    pub subtotal: Price,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        Self {
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            items: cart,
        }
    }
}

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Request body for setting a line's quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub quantity: u32,
}

/// The current session cart.
///
/// GET /api/cart
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart.into()))
}

/// Add a product to the cart, merging quantities by product.
///
/// POST /api/cart/items
#[tracing::instrument(skip_all, fields(product_id = %req.product_id))]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    if req.quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .get_by_id(req.product_id)
        .await?
        .filter(|p| p.active)
        .ok_or_else(|| AppError::NotFound(format!("product {}", req.product_id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add_line(CartLine {
        product_id: product.id,
        name: product.name,
        price: product.price,
        quantity: req.quantity,
        image_url: product.image_url,
    });
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// Set a line's quantity; zero removes the line.
///
/// PATCH /api/cart/items/{productId}
pub async fn set_quantity(
    session: Session,
    Path(product_id): Path<ProductId>,
    Json(req): Json<SetQuantityRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.set_quantity(product_id, req.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// Remove a line entirely.
///
/// DELETE /api/cart/items/{productId}
pub async fn remove_item(
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(product_id);
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// Empty the cart.
///
/// DELETE /api/cart
pub async fn clear(session: Session) -> Result<StatusCode> {
    let _ = session.remove::<Cart>(session_keys::CART).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_cart(session: &Session) -> Result<Cart> {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
        .map(Option::unwrap_or_default)
}

async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}
