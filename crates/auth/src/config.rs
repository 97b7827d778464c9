//! Token signing configuration
//!
//! Validated once at startup; a `JwtConfig` value cannot exist with a
//! weak secret, so everything downstream can treat it as trusted.

use std::fmt;
use std::time::Duration;

use crate::error::AuthError;

/// Shortest accepted HMAC secret, in characters
pub const MIN_SECRET_LEN: usize = 32;

pub const DEFAULT_ISSUER: &str = "plantplanet";
pub const DEFAULT_AUDIENCE: &str = "plantplanet-web";
pub const DEFAULT_EXPIRATION_MS: u64 = 86_400_000;

/// Authentication configuration
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    issuer: String,
    audience: String,
    expiration: chrono::Duration,
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        expiration: Duration,
    ) -> Result<Self, AuthError> {
        let secret = secret.into();
        let issuer = issuer.into();
        let audience = audience.into();

        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(AuthError::InvalidConfig(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }
        if issuer.trim().is_empty() {
            return Err(AuthError::InvalidConfig(
                "JWT issuer must not be empty".to_string(),
            ));
        }
        if audience.trim().is_empty() {
            return Err(AuthError::InvalidConfig(
                "JWT audience must not be empty".to_string(),
            ));
        }
        if expiration < Duration::from_secs(1) {
            return Err(AuthError::InvalidConfig(
                "JWT expiration must be at least one second".to_string(),
            ));
        }
        let expiration = chrono::Duration::from_std(expiration).map_err(|_| {
            AuthError::InvalidConfig("JWT expiration is out of range".to_string())
        })?;

        Ok(Self {
            secret,
            issuer,
            audience,
            expiration,
        })
    }

    /// Load from `JWT_SECRET`, `JWT_ISSUER`, `JWT_AUDIENCE`, `JWT_EXPIRATION_MS`
    pub fn from_env() -> Result<Self, AuthError> {
        from_lookup(|key| std::env::var(key).ok())
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn expiration(&self) -> chrono::Duration {
        self.expiration
    }
}

fn from_lookup<F>(var: F) -> Result<JwtConfig, AuthError>
where
    F: Fn(&str) -> Option<String>,
{
    let secret = var("JWT_SECRET")
        .ok_or_else(|| AuthError::InvalidConfig("JWT_SECRET is required".to_string()))?;
    let issuer = var("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());
    let audience = var("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());
    let expiration_ms = match var("JWT_EXPIRATION_MS") {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            AuthError::InvalidConfig(format!(
                "JWT_EXPIRATION_MS must be a whole number of milliseconds, got {:?}",
                raw
            ))
        })?,
        None => DEFAULT_EXPIRATION_MS,
    };

    JwtConfig::new(
        secret,
        issuer,
        audience,
        Duration::from_millis(expiration_ms),
    )
}

impl fmt::Debug for JwtConfig {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration", &self.expiration)
            .finish()
    }
}
