//! Permission resolution
//!
//! Turns an account into an immutable [`Principal`]. The credential store is
//! injected at construction; nothing here reaches for global state.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::AuthError;
use crate::principal::Principal;
use crate::store::CredentialStore;
use crate::types::{Account, Authority};

#[derive(Clone)]
pub struct PermissionResolver {
    store: Arc<dyn CredentialStore>,
}

impl PermissionResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Build a principal for `account`.
    ///
    /// An account without an id has not been persisted yet; it gets an empty
    /// authority set and the store is not queried.
    pub async fn resolve(&self, account: &Account) -> Result<Principal, AuthError> {
        let authorities: BTreeSet<Authority> = match account.id {
            None => BTreeSet::new(),
            Some(id) => self
                .store
                .find_permissions(id)
                .await?
                .into_iter()
                .map(Authority::from)
                .collect(),
        };

        Ok(Principal::new(account, authorities))
    }

    /// Look the account up by username (email) and resolve it
    pub async fn load_by_username(&self, username: &str) -> Result<Principal, AuthError> {
        let account = self
            .store
            .find_account_by_email(username)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        self.resolve(&account).await
    }
}
