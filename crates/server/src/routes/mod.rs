//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (pings the database)
//! GET  /media/{*path}                - Uploaded product images
//!
//! # Auth
//! POST /api/auth/register            - Create an account and sign in
//! POST /api/auth/login               - Sign in
//! POST /api/auth/logout              - Sign out
//! GET  /api/auth/me                  - Current caller, or null
//!
//! # Catalog
//! GET  /api/categories               - Category list (name-ordered)
//! GET  /api/categories/{id}          - Category detail
//! POST /api/categories               - Create category (admin)
//! GET  /api/products                 - Product list (?categoryId&search&activeOnly)
//! GET  /api/products/{id}            - Product by ID
//! GET  /api/products/slug/{slug}     - Product by slug
//! POST /api/products                 - Create product (admin)
//! PUT  /api/products/{id}            - Partial update (admin)
//! DELETE /api/products/{id}          - Delete product (admin)
//! POST /api/products/image           - Upload product image (admin, base64)
//!
//! # Addresses (authenticated, owner-scoped)
//! GET  /api/addresses                - List caller's addresses
//! POST /api/addresses                - Create address
//! GET  /api/addresses/{id}           - Address detail
//! PUT  /api/addresses/{id}           - Partial update
//! DELETE /api/addresses/{id}         - Delete address
//!
//! # Orders (authenticated)
//! GET  /api/orders                   - Admin sees all, customer sees own
//! POST /api/orders                   - Place an order (checkout)
//! GET  /api/orders/{id}              - Order + items + address
//! PATCH /api/orders/{id}/status      - Set order status (admin)
//!
//! # Dashboard (admin)
//! GET  /api/dashboard/stats          - Store-wide counters and revenue
//!
//! # Cart (session)
//! GET  /api/cart                     - Current cart with derived totals
//! POST /api/cart/items               - Add a product to the cart
//! PATCH /api/cart/items/{productId}  - Set a line's quantity
//! DELETE /api/cart/items/{productId} - Remove a line
//! DELETE /api/cart                   - Empty the cart
//! ```

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route("/{id}", get(categories::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/image", post(products::upload_image))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/slug/{slug}", get(products::show_by_slug))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::list).post(addresses::create))
        .route(
            "/{id}",
            get(addresses::show)
                .put(addresses::update)
                .delete(addresses::remove),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::place))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", patch(orders::update_status))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard::stats))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{product_id}",
            patch(cart::set_quantity).delete(cart::remove_item),
        )
}

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .nest("/addresses", address_routes())
        .nest("/orders", order_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/cart", cart_routes());

    Router::new()
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api)
        .nest_service("/media", ServeDir::new(state.media().root()))
        .with_state(state)
}
