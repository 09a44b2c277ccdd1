//! Database migration command.
//!
//! Applies the embedded storefront migrations. Safe to re-run; already
//! applied migrations are skipped.

use oraya_storefront::db::MIGRATOR;

use super::CliError;

/// Run the storefront database migrations.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running storefront migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
