//! Shared utilities, configuration, and error handling for Plant Planet
//!
//! This crate provides common functionality used across the backend:
//! - Configuration loaded from the environment
//! - Error types and their HTTP mapping
//! - Password hashing
//! - Request extractors

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;

pub use crypto::{
    hash_password, hash_password_blocking, verify_dummy_password_blocking,
    verify_password_blocking,
};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
