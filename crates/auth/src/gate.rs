//! Authorization gate middleware
//!
//! Runs once per request before routing. A valid bearer token installs a
//! [`SecurityContext`] in the request extensions; a bad one ends the request
//! with 401. Requests without a bearer token pass through untouched, leaving
//! the decision to [`crate::require_authentication`] and the handlers.

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::backend::AuthBackend;
use crate::context::SecurityContext;
use crate::error::{error_response, AuthError};
use crate::jwt::extract_bearer_token;

/// Authenticate the bearer token, if any, and install the security context.
///
/// Use with `axum::middleware::from_fn_with_state(backend, authorization_gate)`.
pub async fn authorization_gate(
    State(backend): State<AuthBackend>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let Some(token) = extract_bearer_token(request.headers()).map(str::to_owned) else {
        return next.run(request).await;
    };

    let already_authenticated = request
        .extensions()
        .get::<SecurityContext>()
        .is_some_and(SecurityContext::is_authenticated);
    if already_authenticated {
        return next.run(request).await;
    }

    let outcome = backend.authenticate_token(&token).await;
    match outcome {
        Ok(principal) => {
            tracing::debug!(username = %principal.username(), "Request authenticated");
            request
                .extensions_mut()
                .insert(SecurityContext::authenticated(principal));
            next.run(request).await
        }
        Err(err) => {
            if let Some(ctx) = request.extensions_mut().get_mut::<SecurityContext>() {
                ctx.clear();
            }
            rejection(&err, request.uri().path())
        }
    }
}

fn rejection(err: &AuthError, path: &str) -> Response {
    let message = match err {
        AuthError::TokenExpired => {
            tracing::debug!(path, "Rejected expired token");
            "Token has expired"
        }
        AuthError::InvalidToken | AuthError::IdentityNotFound => {
            tracing::warn!(path, error = %err, "Rejected invalid token");
            "Invalid token"
        }
        _ => {
            tracing::error!(path, error = %err, "Authentication failed unexpectedly");
            "Authentication error"
        }
    };

    error_response(StatusCode::UNAUTHORIZED, message)
}
