//! CLI subcommands.

pub mod maps;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Errors shared by commands that need the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseUrlError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
}

/// Load `DATABASE_URL` from the environment or `.env`.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is not set.
pub fn database_url() -> Result<SecretString, DatabaseUrlError> {
    dotenvy::dotenv().ok();

    std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| DatabaseUrlError::MissingEnvVar("DATABASE_URL"))
}
