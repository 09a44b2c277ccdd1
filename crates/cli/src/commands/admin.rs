//! Admin credential management.

use oraya_storefront::db::admin_credentials::{ADMIN_USERNAME, AdminCredentialRepository};
use oraya_storefront::services::auth::hash_password;

use super::CliError;

/// Hash the given password and store it as the admin credential.
///
/// # Errors
///
/// Returns `CliError` if hashing fails or the database is unreachable.
pub async fn set_password(password: &str) -> Result<(), CliError> {
    let pool = super::connect().await?;

    let hash = hash_password(password)?;
    AdminCredentialRepository::new(&pool)
        .upsert(ADMIN_USERNAME, &hash)
        .await?;

    tracing::info!("Admin password updated");
    Ok(())
}
