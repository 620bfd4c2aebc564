//! Update Profile Use Case
//!
//! Partial update of display name and phone number. Each supplied field is
//! written independently; omitting one leaves it untouched.

use std::sync::Arc;

use crate::application::mutation::modify_account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, display_name::DisplayName, phone_number::PhoneNumber,
};
use crate::error::{IdentityError, IdentityResult};

/// Update profile input
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        input: UpdateProfileInput,
    ) -> IdentityResult<()> {
        if input.name.is_none() && input.phone_number.is_none() {
            return Err(IdentityError::Validation(
                "At least one of name or number is required".to_string(),
            ));
        }

        let display_name = input
            .name
            .map(DisplayName::new)
            .transpose()
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;
        let phone_number = input
            .phone_number
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;

        modify_account(&*self.repo, account_id, |account| {
            if let Some(name) = display_name.clone() {
                account.set_display_name(name);
            }
            if let Some(number) = phone_number.clone() {
                account.set_phone_number(number);
            }
            Ok(())
        })
        .await?;

        tracing::info!(account_id = %account_id, "Profile updated");

        Ok(())
    }
}
