//! Login Use Case
//!
//! Authenticates an email + password pair and issues a fresh access token.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::view::AccountView;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{credential::RawPassword, email::Email};
use crate::error::{IdentityError, IdentityResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> IdentityResult<AccountView> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(IdentityError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let email = Email::new(input.email)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;

        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        // Provider-origin accounts have no credential; a password can never
        // match one
        let credential = account
            .credential
            .as_ref()
            .ok_or(IdentityError::InvalidCredentials)?;

        // A password that fails the registration policy cannot be stored,
        // so it cannot match either
        let raw_password =
            RawPassword::new(input.password).map_err(|_| IdentityError::InvalidCredentials)?;

        if !credential.verify(&raw_password, self.config.pepper()) {
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self
            .config
            .token_issuer()
            .issue(&account.account_id.to_string());

        tracing::info!(
            account_id = %account.account_id,
            "Account signed in"
        );

        Ok(AccountView::project(&account, token))
    }
}
