//! Password hashing shared across Plant Planet crates
//!
//! Passwords are stored as argon2 PHC strings with a random 16-byte salt.
//! Verification is constant-time inside the argon2 crate. The `*_blocking`
//! variants move the argon2 work onto tokio's blocking pool.

use std::sync::LazyLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::{Error, Result};

/// Hash with the default parameters whose password nobody knows.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("plantplanet-unmatched-password").ok());

/// Hash a plaintext password into a PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| Error::Internal(format!("Failed to generate salt: {}", e)))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| Error::Internal(format!("Failed to encode salt: {}", e)))?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(phc)
}

/// Verify a candidate password against a stored PHC string.
///
/// A malformed stored hash never verifies.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Run a full verification against a throwaway hash and report failure.
///
/// Lets a lookup miss take as long as a wrong password.
fn verify_dummy_password(candidate: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(candidate, hash);
    }
    false
}

pub async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))?
}

/// [`verify_password`] on the blocking pool. A failed task never verifies.
pub async fn verify_password_blocking(candidate: String, stored_hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            false
        })
}

pub async fn verify_dummy_password_blocking(candidate: String) -> bool {
    tokio::task::spawn_blocking(move || verify_dummy_password(&candidate))
        .await
        .unwrap_or(false)
}
