//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;

use oraya_storefront::db;
use oraya_storefront::services::AuthError;

/// Errors from CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] db::RepositoryError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Connect to the storefront database from the environment.
///
/// Reads `ORAYA_DATABASE_URL` with fallback to `DATABASE_URL`, loading a
/// `.env` file first if one is present.
pub(crate) async fn connect() -> Result<SqlitePool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ORAYA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("ORAYA_DATABASE_URL"))?;

    let pool = db::create_pool(&SecretString::from(database_url)).await?;
    Ok(pool)
}
