//! Public-route allowlist
//!
//! Paths listed here are reachable without authentication. Everything else
//! needs an authenticated [`SecurityContext`] by the time routing happens.
//! Patterns are Ant-style: a literal path matches itself, `*` matches one
//! path segment, and a trailing `/**` matches the prefix and anything below it.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::context::SecurityContext;
use crate::error::AuthError;

/// Paths reachable without a token
pub const DEFAULT_PUBLIC_PATTERNS: &[&str] = &[
    "/user/login",
    "/user/register",
    "/swagger-ui/**",
    "/swagger-resources/**",
    "/v2/api-docs",
    "/v3/api-docs",
    "/v3/api-docs/**",
    "/plants",
    "/plant/**",
    "/cart/view/**",
    "/cart/**",
    "/cart/add/**",
    "/comments",
    "/comments/**",
    "/email",
    "/email/**",
    "/subscriptions/plans",
    "/subscriptions/plans/**",
];

#[derive(Debug, Clone)]
pub struct PublicRoutes {
    patterns: Arc<[String]>,
}

impl PublicRoutes {
    pub fn new<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::<String>::into).collect(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, path))
    }
}

impl Default for PublicRoutes {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PATTERNS.iter().copied())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments = segments(pattern);
    let path_segments = segments(path);

    match pattern_segments.split_last() {
        Some((&"**", prefix)) => {
            path_segments.len() >= prefix.len()
                && prefix
                    .iter()
                    .zip(&path_segments)
                    .all(|(p, s)| segment_matches(p, s))
        }
        _ => {
            pattern_segments.len() == path_segments.len()
                && pattern_segments
                    .iter()
                    .zip(&path_segments)
                    .all(|(p, s)| segment_matches(p, s))
        }
    }
}

fn segment_matches(pattern: &str, segment: &str) -> bool {
    pattern == "*" || pattern == segment
}

/// Reject non-public requests that reached routing without an authenticated context.
///
/// Layer inside [`crate::authorization_gate`] so the gate has already run:
/// `router.layer(from_fn_with_state(routes, require_authentication)).layer(from_fn_with_state(backend, authorization_gate))`
pub async fn require_authentication(
    State(routes): State<PublicRoutes>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || routes.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let authenticated = request
        .extensions()
        .get::<SecurityContext>()
        .is_some_and(SecurityContext::is_authenticated);

    if authenticated {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "Unauthenticated request to protected route");
        AuthError::MissingAuthorization.into_response()
    }
}
