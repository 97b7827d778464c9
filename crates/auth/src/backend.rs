//! Concrete authentication backend
//!
//! Bundles the token codec with the permission resolver. Domain states expose
//! it via `FromRef`, and the authorization gate takes it as middleware state.

use std::sync::Arc;

use plantplanet_common::{verify_dummy_password_blocking, verify_password_blocking};

use crate::config::JwtConfig;
use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::principal::Principal;
use crate::resolver::PermissionResolver;
use crate::store::CredentialStore;

/// Concrete authentication backend.
///
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    codec: Arc<TokenCodec>,
    resolver: PermissionResolver,
}

impl AuthBackend {
    pub fn new(store: Arc<dyn CredentialStore>, config: JwtConfig) -> Self {
        Self {
            codec: Arc::new(TokenCodec::new(config)),
            resolver: PermissionResolver::new(store),
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn resolver(&self) -> &PermissionResolver {
        &self.resolver
    }

    /// Verify a bearer token and rebuild its principal from the store.
    ///
    /// Authorities come from the current allocations, never from the token's
    /// own claim, so a revoked permission stops working on the next request.
    pub async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError> {
        let username = self.codec.subject(token)?;
        self.resolver.load_by_username(&username).await
    }

    /// Check an email/password pair and issue a token for it.
    ///
    /// Unknown email and wrong password fail identically, and both pay for
    /// one argon2 verification.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Principal, String), AuthError> {
        let principal = match self.resolver.load_by_username(email).await {
            Ok(principal) => principal,
            Err(AuthError::IdentityNotFound) => {
                verify_dummy_password_blocking(password.to_string()).await;
                tracing::debug!("Login attempt for unknown account");
                return Err(AuthError::BadCredentials);
            }
            Err(e) => return Err(e),
        };

        let verified = verify_password_blocking(
            password.to_string(),
            principal.password_hash().to_string(),
        )
        .await;
        if !verified {
            tracing::debug!(account_id = ?principal.account_id(), "Login attempt with wrong password");
            return Err(AuthError::BadCredentials);
        }

        let token = self.codec.issue(&principal)?;
        tracing::info!(account_id = ?principal.account_id(), "User logged in");

        Ok((principal, token))
    }
}

impl std::fmt::Debug for AuthBackend {
    #[mutants::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthBackend")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
