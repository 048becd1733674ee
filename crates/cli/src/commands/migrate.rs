//! Database migration command.
//!
//! Runs the server's schema migrations, then lets the session store
//! create its own table (tower-sessions keeps that DDL internal).

use tower_sessions_sqlx_store::PostgresStore;

use super::CliError;

/// Run all database migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running schema migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete");
    Ok(())
}
