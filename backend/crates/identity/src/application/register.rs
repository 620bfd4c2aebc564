//! Register Use Case
//!
//! Creates a new local account. Registration does not sign the caller in;
//! the success response is an acknowledgment only.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::entity::account::Account;
use crate::domain::notifier::Notifier;
use crate::domain::repository::{AccountRepository, InsertOutcome};
use crate::domain::value_object::{
    credential::{RawPassword, StoredCredential},
    display_name::DisplayName,
    email::Email,
    phone_number::PhoneNumber,
};
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

/// Register use case
pub struct RegisterUseCase<R, N>
where
    R: AccountRepository,
    N: Notifier + Send + Sync + 'static,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<IdentityConfig>,
}

impl<R, N> RegisterUseCase<R, N>
where
    R: AccountRepository,
    N: Notifier + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>, config: Arc<IdentityConfig>) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<()> {
        // Validate all four fields
        let display_name = DisplayName::new(input.name)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;
        let email = Email::new(input.email)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;
        let phone_number = PhoneNumber::new(input.phone_number)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;
        let raw_password = RawPassword::new(input.password)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;

        // Check whether the email already has an account
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(IdentityError::AlreadyRegistered);
        }

        // Hash the credential
        let credential = StoredCredential::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        let account = Account::register_local(email, display_name, phone_number, credential);

        // The unique email index backstops the check above under concurrency
        match self.repo.insert(&account).await? {
            InsertOutcome::Inserted => {}
            InsertOutcome::DuplicateEmail => return Err(IdentityError::AlreadyRegistered),
        }

        tracing::info!(
            account_id = %account.account_id,
            "Account registered"
        );

        // Welcome SMS is best-effort: a delivery failure must never fail
        // the registration that triggered it
        if let Some(number) = account.phone_number.clone() {
            let notifier = self.notifier.clone();
            let message = self.config.welcome_message.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.send(&message, &number).await {
                    tracing::warn!(error = %e, "Welcome notification failed");
                }
            });
        }

        Ok(())
    }
}
