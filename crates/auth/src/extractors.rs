//! Axum extractor for the authenticated principal
//!
//! Reads the [`SecurityContext`] the authorization gate left in the request
//! extensions; it never touches the token or the store again.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::context::SecurityContext;
use crate::error::AuthError;
use crate::principal::Principal;

fn principal_from(parts: &Parts) -> Option<Arc<Principal>> {
    parts
        .extensions
        .get::<SecurityContext>()
        .and_then(SecurityContext::principal)
        .cloned()
}

/// Authenticated principal; rejects with 401 when the gate installed none
#[derive(Debug, Clone)]
pub struct AuthUser(pub Arc<Principal>);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        principal_from(parts)
            .map(AuthUser)
            .ok_or(AuthError::MissingAuthorization)
    }
}
