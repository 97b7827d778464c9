//! Auth read-model types
//!
//! Lightweight views of the account rows owned by the accounts domain.
//! These types carry only the fields needed for authentication and authorization.

use std::fmt;

use serde::Serialize;

/// Numeric account identifier as stored
pub type AccountId = i32;

/// Identity record as held by the credential store.
///
/// `id` is `None` until the account has been persisted.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: Option<AccountId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: Option<String>,
}

impl fmt::Debug for Account {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("profile_image", &self.profile_image)
            .finish()
    }
}

/// A single permission label, e.g. `ROLE_USER`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Authority {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Authority {
    fn from(label: String) -> Self {
        Self(label)
    }
}
