//! In-Memory Account Store
//!
//! Store-compatible implementation backed by a HashMap, for tests and for
//! running the service without a database. Keeps the same outcome semantics
//! as the PostgreSQL store: duplicate-email detection on insert and
//! compare-and-set on update.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, InsertOutcome, UpdateOutcome};
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::IdentityResult;

/// In-memory account store
///
/// All data is lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub fn count(&self) -> usize {
        self.accounts.read().len()
    }
}

impl AccountRepository for InMemoryAccountStore {
    async fn insert(&self, account: &Account) -> IdentityResult<InsertOutcome> {
        let mut accounts = self.accounts.write();

        if accounts.values().any(|a| a.email == account.email) {
            return Ok(InsertOutcome::DuplicateEmail);
        }

        accounts.insert(*account.account_id.as_uuid(), account.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>> {
        Ok(self.accounts.read().get(account_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .values()
            .find(|a| a.email == *email)
            .cloned())
    }

    async fn update(&self, account: &Account) -> IdentityResult<UpdateOutcome> {
        let mut accounts = self.accounts.write();

        let Some(existing) = accounts.get_mut(account.account_id.as_uuid()) else {
            return Ok(UpdateOutcome::Missing);
        };

        if existing.version != account.version {
            return Ok(UpdateOutcome::VersionConflict);
        }

        let mut written = account.clone();
        written.version += 1;
        *existing = written;

        Ok(UpdateOutcome::Applied)
    }
}
