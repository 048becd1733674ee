//! Domain models for the storefront API.

pub mod address;
pub mod catalog;
pub mod order;
pub mod user;

pub use address::Address;
pub use catalog::{Category, Product};
pub use order::{Order, OrderDetail, OrderItem};
pub use user::{CurrentUser, User};

/// Session keys used by the server.
///
/// Kept in one place so handlers and extractors never disagree on spelling.
pub mod session_keys {
    /// The authenticated caller, set at login and cleared at logout.
    pub const CURRENT_USER: &str = "current_user";

    /// The session-mirrored cart.
    pub const CART: &str = "cart";
}
