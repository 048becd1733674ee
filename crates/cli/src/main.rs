//! Lamore CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (including the session store's)
//! lamore-cli migrate
//!
//! # Seed the catalog with the bakery's categories and products
//! lamore-cli seed
//!
//! # Promote an existing user to admin
//! lamore-cli admin promote -e owner@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `LAMORE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lamore-cli")]
#[command(author, version, about = "Lamore storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog with the bakery's categories and products
    Seed,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Promote an existing user to the admin role
    Promote {
        /// Email of the user to promote
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), commands::CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lamore_cli=info,sqlx=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
        Commands::Admin {
            action: AdminAction::Promote { email },
        } => commands::admin::promote(&email).await,
    }
}
