//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! umkm-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string shared by both binaries
//!
//! # Migration Files
//!
//! SQL migrations live in `migrations/` at the workspace root. The session
//! tables are owned by `tower-sessions-sqlx-store` and created here too:
//! the storefront uses the default table, the admin its own table.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

use umkm_admin::middleware::session::session_store;

use super::{DatabaseUrlError, database_url};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Config(#[from] DatabaseUrlError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run SQL migrations, then the storefront and admin session store migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running SQL migrations...");
    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!("Creating storefront session table...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Creating admin session table...");
    session_store(&pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
