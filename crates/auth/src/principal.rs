//! Resolved identity plus permissions

use std::collections::BTreeSet;
use std::fmt;

use crate::types::{Account, AccountId, Authority};

/// Immutable projection of one account and its authorities at build time.
///
/// Only the permission resolver constructs principals. The authority set is
/// fixed for the lifetime of the value, so a request never observes a
/// permission change halfway through.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    account_id: Option<AccountId>,
    name: String,
    email: String,
    password_hash: String,
    profile_image: Option<String>,
    authorities: BTreeSet<Authority>,
}

impl Principal {
    pub(crate) fn new(account: &Account, authorities: BTreeSet<Authority>) -> Self {
        Self {
            account_id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            profile_image: account.profile_image.clone(),
            authorities,
        }
    }

    /// Login name; the account email
    pub fn username(&self) -> &str {
        &self.email
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    /// Stored hash, for credential verification only
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn authorities(&self) -> &BTreeSet<Authority> {
        &self.authorities
    }

    /// Authority labels in sorted order, as written into token claims
    pub fn authority_labels(&self) -> Vec<String> {
        self.authorities
            .iter()
            .map(|a| a.as_str().to_string())
            .collect()
    }

    pub fn has_authority(&self, label: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == label)
    }
}

impl fmt::Debug for Principal {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("account_id", &self.account_id)
            .field("email", &self.email)
            .field("authorities", &self.authorities)
            .finish_non_exhaustive()
    }
}
