//! Admin user management.

use lamore_core::{Email, UserRole};
use lamore_server::db::UserRepository;

use super::CliError;

/// Promote an existing user to the admin role.
///
/// The account must already exist (register through the API first).
pub async fn promote(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let pool = super::connect().await?;

    UserRepository::new(&pool)
        .set_role(&email, UserRole::Admin)
        .await?;

    tracing::info!(email = %email, "user promoted to admin");
    Ok(())
}
