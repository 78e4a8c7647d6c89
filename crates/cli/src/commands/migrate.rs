//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! vitrine-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/`.

use thiserror::Error;
use vitrine_api::config::StoreConfig;
use vitrine_api::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// `DATABASE_URL` is unset or not a `PostgreSQL` URL.
    #[error("DATABASE_URL must point at a PostgreSQL database")]
    NotPostgres,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the document store migrations.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the store is not
/// `PostgreSQL`, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let StoreConfig::Postgres(database_url) = &config.store else {
        return Err(MigrationError::NotPostgres.into());
    };

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url)
        .await
        .map_err(MigrationError::from)?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations")
        .run(&pool)
        .await
        .map_err(MigrationError::from)?;

    tracing::info!("Migrations complete!");
    Ok(())
}
