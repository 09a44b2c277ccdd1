//! Admin credential repository.
//!
//! There is a single shared admin password, stored as an argon2 PHC string
//! under a fixed username. No user/roles system.

use sqlx::SqlitePool;

use super::RepositoryError;

/// Username of the single shared admin credential.
pub const ADMIN_USERNAME: &str = "admin";

/// Repository for admin credential database operations.
pub struct AdminCredentialRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminCredentialRepository<'a> {
    /// Create a new admin credential repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the stored password hash for a username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn password_hash(&self, username: &str) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM admin_credentials WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(hash)
    }

    /// Insert or replace the password hash for a username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, username: &str, password_hash: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO admin_credentials (username, password_hash)
            VALUES (?1, ?2)
            ON CONFLICT(username) DO UPDATE SET password_hash = excluded.password_hash
            ",
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
