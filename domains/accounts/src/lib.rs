//! Accounts domain: login, registration, profile changes

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::entities::{AccountChanges, NewAccount, ReadUser, DEFAULT_PERMISSION};
pub use repository::{AccountsRepositories, UserRepository};

pub use api::routes;
pub use api::AccountsState;
