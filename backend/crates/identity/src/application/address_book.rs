//! Address Book Use Case
//!
//! Add, delete, and edit shipping addresses. Clients address entries by
//! position, and deleting index `i` shifts every later entry down by one;
//! indices must not be assumed stable across mutations.

use std::sync::Arc;

use crate::application::mutation::modify_account;
use crate::application::view::AddressView;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, address::Address};
use crate::error::{IdentityError, IdentityResult};

/// Full address record input (all seven fields required)
pub struct AddressInput {
    pub full_name: String,
    pub number: String,
    pub pin_code: String,
    pub state: String,
    pub city: String,
    pub house_number: String,
    pub road_name: String,
}

impl AddressInput {
    fn into_address(self) -> IdentityResult<Address> {
        Address::new(
            self.full_name,
            self.number,
            self.pin_code,
            self.state,
            self.city,
            self.house_number,
            self.road_name,
        )
        .map_err(|e| IdentityError::Validation(e.message().to_string()))
    }
}

/// Address book use case
pub struct AddressBookUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> AddressBookUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Append an address; returns the full updated list
    pub async fn add(
        &self,
        account_id: &AccountId,
        input: AddressInput,
    ) -> IdentityResult<Vec<AddressView>> {
        let address = input.into_address()?;

        let account = modify_account(&*self.repo, account_id, |account| {
            account.add_address(address.clone());
            Ok(())
        })
        .await?;

        tracing::info!(
            account_id = %account_id,
            addresses = account.addresses.len(),
            "Address added"
        );

        Ok(account.addresses.iter().map(AddressView::from).collect())
    }

    /// Delete the address at `index`, shifting subsequent entries down
    pub async fn delete(&self, account_id: &AccountId, index: usize) -> IdentityResult<()> {
        modify_account(&*self.repo, account_id, |account| {
            let len = account.addresses.len();
            account
                .remove_address(index)
                .map(|_| ())
                .ok_or(IdentityError::AddressIndexOutOfRange { index, len })
        })
        .await?;

        tracing::info!(account_id = %account_id, index, "Address deleted");

        Ok(())
    }

    /// Overwrite all fields of the address at `index`; returns the full list
    pub async fn edit(
        &self,
        account_id: &AccountId,
        index: usize,
        input: AddressInput,
    ) -> IdentityResult<Vec<AddressView>> {
        let address = input.into_address()?;

        let account = modify_account(&*self.repo, account_id, |account| {
            let len = account.addresses.len();
            if !account.replace_address(index, address.clone()) {
                return Err(IdentityError::AddressIndexOutOfRange { index, len });
            }
            Ok(())
        })
        .await?;

        tracing::info!(account_id = %account_id, index, "Address edited");

        Ok(account.addresses.iter().map(AddressView::from).collect())
    }
}
