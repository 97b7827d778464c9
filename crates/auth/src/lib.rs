//! Stateless authentication for the Plant Planet API
//!
//! Issues and verifies signed bearer tokens, resolves an account's
//! permissions from the credential store on every request, and provides the
//! axum middleware and extractors that put the result in front of handlers.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
mod jwt;
pub mod mock;
mod principal;
mod public_routes;
mod resolver;
mod store;
mod types;

pub use backend::AuthBackend;
pub use claims::TokenClaims;
pub use config::{
    JwtConfig, DEFAULT_AUDIENCE, DEFAULT_EXPIRATION_MS, DEFAULT_ISSUER, MIN_SECRET_LEN,
};
pub use context::SecurityContext;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use gate::authorization_gate;
pub use jwt::{bearer_header_value, extract_bearer_token, TokenCodec, TOKEN_PREFIX};
pub use principal::Principal;
pub use public_routes::{require_authentication, PublicRoutes, DEFAULT_PUBLIC_PATTERNS};
pub use resolver::PermissionResolver;
pub use store::{CredentialStore, PgCredentialStore};
pub use types::{Account, AccountId, Authority};
