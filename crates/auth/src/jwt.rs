//! Token issuance, verification and bearer-header helpers

use std::fmt;

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::TokenClaims;
use crate::config::JwtConfig;
use crate::error::AuthError;
use crate::principal::Principal;
use crate::types::Authority;

pub const TOKEN_PREFIX: &str = "Bearer ";

const ALGORITHM: Algorithm = Algorithm::HS512;

/// Signs principals into tokens and verifies tokens back into claims.
///
/// Holds only immutable key material, so one instance can serve any number
/// of concurrent verifications.
#[derive(Clone)]
pub struct TokenCodec {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[config.audience()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        // Expiry is checked in `verify_at` against the caller's clock, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret().as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret().as_bytes()),
            validation,
            config,
        }
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as of `now`.
    ///
    /// `iat` is `now` truncated to whole seconds and `exp` is `iat` plus the
    /// configured expiration, also in whole seconds. The lifetime therefore
    /// runs from the truncated `iat`: a token issued at `x.999` is valid for
    /// 0.999 s less than the configured expiration.
    pub fn issue_at(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, AuthError> {
        let issued_at = now.timestamp();
        let expires_at = DateTime::<Utc>::from_timestamp(issued_at, 0)
            .and_then(|t| t.checked_add_signed(self.config.expiration()))
            .ok_or_else(|| AuthError::Unexpected("Token expiry overflows".to_string()))?
            .timestamp();

        let claims = TokenClaims {
            sub: principal.username().to_string(),
            email: principal.email().to_string(),
            authorities: principal.authority_labels(),
            iss: self.config.issuer().to_string(),
            aud: self.config.audience().to_string(),
            iat: issued_at,
            exp: expires_at,
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AuthError::Unexpected(format!("Failed to sign token: {}", e))
        })
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature, structure, issuer and audience, then expiry as of `now`.
    ///
    /// A token is expired once `now` (whole seconds) reaches `exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                AuthError::InvalidToken
            })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            tracing::debug!(subject = %claims.sub, exp = claims.exp, "JWT expired");
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Verified subject (the principal's username)
    pub fn subject(&self, token: &str) -> Result<String, AuthError> {
        Ok(self.verify(token)?.sub)
    }

    /// Verified authorities claim
    pub fn authorities(&self, token: &str) -> Result<Vec<Authority>, AuthError> {
        Ok(self
            .verify(token)?
            .authorities
            .into_iter()
            .map(Authority::from)
            .collect())
    }

    /// Verified email claim
    pub fn email(&self, token: &str) -> Result<String, AuthError> {
        Ok(self.verify(token)?.email)
    }
}

impl fmt::Debug for TokenCodec {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("config", &self.config)
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

/// Extract the bearer token from the Authorization header.
///
/// A missing header, a non-text value or any scheme other than `Bearer`
/// all mean "no credential supplied".
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(TOKEN_PREFIX)
}

/// `Authorization` header value carrying a freshly issued token
pub fn bearer_header_value(token: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(&format!("{}{}", TOKEN_PREFIX, token))
        .map_err(|e| AuthError::Unexpected(format!("Token is not a valid header value: {}", e)))
}
