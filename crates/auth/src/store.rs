//! Credential store seam
//!
//! The auth crate only reads identities and permission allocations. Writes
//! (registration, profile changes) belong to the accounts domain. The
//! Postgres implementation uses runtime `sqlx::query_as` so the crate builds
//! without a live database.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AuthError;
use crate::types::{Account, AccountId};

/// Read access to accounts and their permission labels
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look an account up by its login email (case-sensitive)
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;

    /// All permission labels allocated to an account
    async fn find_permissions(&self, account_id: AccountId) -> Result<Vec<String>, AuthError>;
}

/// Postgres-backed credential store.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let account: Option<Account> = sqlx::query_as(
            r#"
            SELECT id, name, email, password AS password_hash, profile_image
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load account");
            AuthError::CredentialStore(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_permissions(&self, account_id: AccountId) -> Result<Vec<String>, AuthError> {
        let labels: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT p.id
            FROM permission p
            INNER JOIN allocate a ON p.id = a.permission_id
            WHERE a.user_id = $1
            ORDER BY p.id ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, account_id, "Failed to load permissions");
            AuthError::CredentialStore(e.to_string())
        })?;

        Ok(labels.into_iter().map(|(label,)| label).collect())
    }
}
