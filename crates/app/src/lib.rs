//! Plant Planet application composition root
//!
//! Composes the domain routers behind the authentication layers.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use plantplanet_accounts::{AccountsRepositories, AccountsState};
use plantplanet_auth::{
    authorization_gate, require_authentication, AuthBackend, JwtConfig, PgCredentialStore,
    PublicRoutes, DEFAULT_PUBLIC_PATTERNS,
};
use sqlx::PgPool;

/// Infrastructure routes that never require a token
const INFRASTRUCTURE_ROUTES: &[&str] = &["/", "/health"];

/// Allowlist used by the running service
pub fn public_routes() -> PublicRoutes {
    PublicRoutes::new(
        DEFAULT_PUBLIC_PATTERNS
            .iter()
            .chain(INFRASTRUCTURE_ROUTES)
            .copied(),
    )
}

/// Create the main application router backed by Postgres
pub fn create_app(pool: PgPool, jwt_config: JwtConfig) -> Router {
    let store = Arc::new(PgCredentialStore::new(pool.clone()));

    let state = AccountsState {
        repos: AccountsRepositories::new(pool),
        auth: AuthBackend::new(store, jwt_config),
    };

    build_router(state, public_routes())
}

/// Assemble routes and authentication layers around an existing state.
///
/// The gate is the outer layer, so `require_authentication` sees the
/// security context it installed.
pub fn build_router(state: AccountsState, public_routes: PublicRoutes) -> Router {
    let auth: AuthBackend = state.auth.clone();

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Plant Planet API v0.1.0" }))
        .merge(plantplanet_accounts::routes().with_state(state))
        .layer(from_fn_with_state(public_routes, require_authentication))
        .layer(from_fn_with_state(auth, authorization_gate))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
