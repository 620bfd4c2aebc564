//! Conditional Account Mutation
//!
//! Shared read-modify-write loop for every collection mutator. The store
//! update is conditional on the record version; a conflict means another
//! request wrote first, so the whole read-modify-write is retried against
//! the fresh record.

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, UpdateOutcome};
use crate::domain::value_object::account_id::AccountId;
use crate::error::{IdentityError, IdentityResult};

/// Attempts before giving up on a contended account
const MAX_UPDATE_ATTEMPTS: usize = 3;

/// Apply `mutate` to the account and persist it, retrying on version conflict
///
/// Returns the account as written (version already advanced).
pub(crate) async fn modify_account<R, F>(
    repo: &R,
    account_id: &AccountId,
    mut mutate: F,
) -> IdentityResult<Account>
where
    R: AccountRepository,
    F: FnMut(&mut Account) -> IdentityResult<()>,
{
    for attempt in 1..=MAX_UPDATE_ATTEMPTS {
        let mut account = repo
            .find_by_id(account_id)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        mutate(&mut account)?;

        match repo.update(&account).await? {
            UpdateOutcome::Applied => {
                account.version += 1;
                return Ok(account);
            }
            UpdateOutcome::VersionConflict => {
                tracing::debug!(
                    account_id = %account_id,
                    attempt,
                    "Account version conflict, retrying"
                );
            }
            UpdateOutcome::Missing => return Err(IdentityError::AccountNotFound),
        }
    }

    Err(IdentityError::UpdateConflict)
}
