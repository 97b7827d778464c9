//! In-memory credential store
//!
//! Backs tests and local demos without a database. Supports permission
//! revocation and simulated outages so gate behaviour can be exercised.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::AuthError;
use crate::store::CredentialStore;
use crate::types::{Account, AccountId};

/// Credential store kept entirely in process memory
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: Mutex<HashMap<String, Account>>,
    allocations: Mutex<HashMap<AccountId, BTreeSet<String>>>,
    next_id: AtomicI32,
    unavailable: AtomicBool,
    permission_queries: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new account and return it with its assigned id
    pub fn insert_account(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        profile_image: Option<&str>,
    ) -> Account {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let account = Account {
            id: Some(id),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            profile_image: profile_image.map(str::to_string),
        };
        lock(&self.accounts).insert(email.to_string(), account.clone());
        account
    }

    pub fn remove_account(&self, email: &str) -> Option<Account> {
        let removed = lock(&self.accounts).remove(email);
        if let Some(id) = removed.as_ref().and_then(|a| a.id) {
            lock(&self.allocations).remove(&id);
        }
        removed
    }

    pub fn grant(&self, account_id: AccountId, label: &str) {
        lock(&self.allocations)
            .entry(account_id)
            .or_default()
            .insert(label.to_string());
    }

    pub fn revoke(&self, account_id: AccountId, label: &str) {
        if let Some(labels) = lock(&self.allocations).get_mut(&account_id) {
            labels.remove(label);
        }
    }

    /// Make every subsequent query fail, as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of permission lookups served so far
    pub fn permission_queries(&self) -> usize {
        self.permission_queries.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), AuthError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::CredentialStore(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        self.check_available()?;
        Ok(lock(&self.accounts).get(email).cloned())
    }

    async fn find_permissions(&self, account_id: AccountId) -> Result<Vec<String>, AuthError> {
        self.permission_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(lock(&self.allocations)
            .get(&account_id)
            .map(|labels| labels.iter().cloned().collect())
            .unwrap_or_default())
    }
}
