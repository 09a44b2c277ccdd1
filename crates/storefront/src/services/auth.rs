//! Admin authentication service.
//!
//! Verifies the single shared admin password against an argon2 PHC hash.
//! The hash comes from the `ORAYA_ADMIN_PASSWORD_HASH` environment override
//! when set, otherwise from the `admin_credentials` table.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use crate::config::StorefrontConfig;
use crate::db::RepositoryError;
use crate::db::admin_credentials::{ADMIN_USERNAME, AdminCredentialRepository};

/// Errors that can occur during admin authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No admin credential is configured (neither env override nor DB row).
    #[error("no admin credential configured")]
    NoCredential,

    /// Stored hash could not be parsed, or hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service verifying the shared admin password.
pub struct AdminAuthService<'a> {
    credentials: AdminCredentialRepository<'a>,
    config: &'a StorefrontConfig,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin auth service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, config: &'a StorefrontConfig) -> Self {
        Self {
            credentials: AdminCredentialRepository::new(pool),
            config,
        }
    }

    /// Verify a candidate password against the configured hash.
    ///
    /// Argon2 verification is salted and constant-time. Returns `Ok(false)`
    /// for a wrong password; errors are reserved for missing or unparseable
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoCredential` if no hash is configured anywhere.
    /// Returns `AuthError::PasswordHash` if the stored hash is not a valid
    /// PHC string.
    pub async fn verify_password(&self, candidate: &str) -> Result<bool, AuthError> {
        let stored = match &self.config.admin_password_hash {
            Some(hash) => hash.expose_secret().to_owned(),
            None => self
                .credentials
                .password_hash(ADMIN_USERNAME)
                .await?
                .ok_or(AuthError::NoCredential)?,
        };

        let parsed = PasswordHash::new(&stored).map_err(|_| AuthError::PasswordHash)?;

        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Hash a password into an argon2 PHC string with a fresh random salt.
///
/// Used by the CLI when setting the admin credential.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}
