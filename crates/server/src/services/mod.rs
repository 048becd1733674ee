//! Business services sitting between routes and repositories.

pub mod auth;
pub mod checkout;
pub mod media;
