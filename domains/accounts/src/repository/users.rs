//! User repository
//!
//! Owns writes to `users` and `allocate`. Reads used for authentication go
//! through the credential store in `plantplanet-auth` instead.

use plantplanet_auth::{Account, AccountId};
use plantplanet_common::RepositoryError;
use sqlx::PgPool;

use crate::domain::entities::{AccountChanges, NewAccount, DEFAULT_PERMISSION};

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether any account already uses `email`
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(RepositoryError::from_sqlx)?;

        Ok(exists)
    }

    /// Insert an account and grant it the default permission in one transaction.
    ///
    /// A concurrent registration with the same email surfaces as
    /// `RepositoryError::AlreadyExists`.
    pub async fn create(&self, account: NewAccount) -> Result<Account> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from_sqlx)?;

        let created: Account = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password, profile_image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password AS password_hash, profile_image
            "#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.profile_image)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        sqlx::query("INSERT INTO allocate (user_id, permission_id) VALUES ($1, $2)")
            .bind(created.id)
            .bind(DEFAULT_PERMISSION)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        tx.commit().await.map_err(RepositoryError::from_sqlx)?;

        Ok(created)
    }

    /// Apply a partial update; `None` fields keep their stored value
    pub async fn update(&self, id: AccountId, changes: AccountChanges) -> Result<Option<Account>> {
        let updated = sqlx::query_as(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password = COALESCE($4, password),
                profile_image = COALESCE($5, profile_image)
            WHERE id = $1
            RETURNING id, name, email, password AS password_hash, profile_image
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.profile_image)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(updated)
    }
}
