//! Account-facing entities
//!
//! `Account` itself lives in `plantplanet-auth` because the credential store
//! reads it; this module holds what the accounts domain adds on top.

use plantplanet_auth::{Account, AccountId, Principal};
use serde::Serialize;

/// Permission granted to every newly registered account
pub const DEFAULT_PERMISSION: &str = "ROLE_USER";

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadUser {
    pub id: Option<AccountId>,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

impl From<&Account> for ReadUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            profile_image: account.profile_image.clone(),
        }
    }
}

impl From<&Principal> for ReadUser {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.account_id(),
            name: principal.name().to_string(),
            email: principal.email().to_string(),
            profile_image: principal.profile_image().map(str::to_string),
        }
    }
}

/// Fields to persist for a new account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: Option<String>,
}

/// Partial update of an existing account. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub profile_image: Option<String>,
}
