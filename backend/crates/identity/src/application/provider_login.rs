//! Provider Login Use Case
//!
//! Single resolution path for every federated provider: verify the
//! assertion, then resolve the account by email. The email is the identity
//! key: a provider login for an email that already has an account (of any
//! origin) reuses that account untouched; only an unseen email creates one.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::view::AccountView;
use crate::domain::entity::account::Account;
use crate::domain::provider::IdentityVerifier;
use crate::domain::repository::{AccountRepository, InsertOutcome};
use crate::domain::value_object::{display_name::DisplayName, email::Email};
use crate::error::{IdentityError, IdentityResult};

/// Provider login use case, parameterized by the verifier capability
pub struct ProviderLoginUseCase<R, V>
where
    R: AccountRepository,
    V: IdentityVerifier,
{
    repo: Arc<R>,
    verifier: Arc<V>,
    config: Arc<IdentityConfig>,
}

impl<R, V> ProviderLoginUseCase<R, V>
where
    R: AccountRepository,
    V: IdentityVerifier,
{
    pub fn new(repo: Arc<R>, verifier: Arc<V>, config: Arc<IdentityConfig>) -> Self {
        Self {
            repo,
            verifier,
            config,
        }
    }

    pub async fn execute(&self, assertion: &V::Assertion) -> IdentityResult<AccountView> {
        let identity = self.verifier.verify(assertion).await?;

        if identity.email.trim().is_empty() || identity.display_name.trim().is_empty() {
            return Err(IdentityError::Validation(
                "Provider identity is missing email or name".to_string(),
            ));
        }

        let email = Email::new(identity.email)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;
        let display_name = DisplayName::new(identity.display_name)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;

        let account = match self.repo.find_by_email(&email).await? {
            // Existing account, whatever its origin: reuse as-is. Origin and
            // credential are never merged or overwritten.
            Some(existing) => existing,
            None => self.create_account(email, display_name).await?,
        };

        let token = self
            .config
            .token_issuer()
            .issue(&account.account_id.to_string());

        tracing::info!(
            account_id = %account.account_id,
            provider = %self.verifier.origin(),
            "Account signed in via provider"
        );

        Ok(AccountView::project(&account, token))
    }

    async fn create_account(
        &self,
        email: Email,
        display_name: DisplayName,
    ) -> IdentityResult<Account> {
        let account = Account::from_provider(email.clone(), display_name, self.verifier.origin());

        match self.repo.insert(&account).await? {
            InsertOutcome::Inserted => {
                tracing::info!(
                    account_id = %account.account_id,
                    provider = %self.verifier.origin(),
                    "Account created via provider"
                );
                Ok(account)
            }
            // Concurrent first logins for the same email: exactly one insert
            // wins, everyone resolves to the winner
            InsertOutcome::DuplicateEmail => self
                .repo
                .find_by_email(&email)
                .await?
                .ok_or_else(|| {
                    IdentityError::Internal("Account missing after duplicate insert".to_string())
                }),
        }
    }
}
