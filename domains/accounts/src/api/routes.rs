//! Route definitions for Accounts domain API

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::users;
use super::middleware::AccountsState;

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route("/user/login", post(users::login))
        .route("/user/register", post(users::register))
        .route("/user/logout", post(users::logout))
        .route("/user/change", put(users::change))
        .route("/user/me", get(users::me))
}
