//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::IdentityResult;

/// Outcome of an insert attempt
///
/// Duplicate emails are a domain outcome, not a fault: the unique email
/// index backstops the check-then-insert race between concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateEmail,
}

/// Outcome of a conditional (compare-and-set) update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The expected version matched and the record was written
    Applied,
    /// Another writer bumped the version first; nothing was written
    VersionConflict,
    /// No record with this id exists
    Missing,
}

/// Account store trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    async fn insert(&self, account: &Account) -> IdentityResult<InsertOutcome>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>>;

    /// Find account by email
    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Account>>;

    /// Write back a modified account, conditional on `account.version`
    ///
    /// On `Applied` the stored version becomes `account.version + 1`.
    async fn update(&self, account: &Account) -> IdentityResult<UpdateOutcome>;
}
