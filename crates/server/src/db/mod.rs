//! Database operations for the storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `users` - Accounts and roles
//! - `categories` - Catalog reference data
//! - `products` - Catalog products with live stock
//! - `addresses` - User delivery addresses
//! - `orders` / `order_items` - Order headers and purchase-time snapshots
//! - `sessions` - Tower-sessions storage
//!
//! All queries use the runtime sqlx API (`query_as`/`QueryBuilder`) so the
//! workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p lamore-cli -- migrate
//! ```

pub mod addresses;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use categories::CategoryRepository;
pub use dashboard::DashboardRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique slug, non-negative stock).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
