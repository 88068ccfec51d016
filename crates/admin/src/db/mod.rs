//! Database operations for the admin panel.
//!
//! The admin is the only writer of `umkm` and `products`. It shares the
//! database with the storefront, which reads the same tables.
//!
//! ## Tables
//!
//! - `umkm` - Business listings
//! - `products` - Products, deleted with their UMKM (`ON DELETE CASCADE`)
//! - `admin_session` - Admin session storage
//!
//! # Migrations
//!
//! Migrations live in the workspace `migrations/` directory and run via:
//! ```bash
//! cargo run -p umkm-cli -- migrate
//! ```

pub mod products;
pub mod umkm;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use products::ProductRepository;
pub use umkm::{UmkmRepository, UmkmWithCount};

/// Column list shared by every `umkm` query.
pub(crate) const UMKM_COLUMNS: &str = "id, name, description, category, phone, whatsapp, \
     address, latitude, longitude, image_url, opening_hours, status, created_at, updated_at";

/// Column list shared by every `products` query.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, umkm_id, name, description, price, image_url, status, created_at, updated_at";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
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
