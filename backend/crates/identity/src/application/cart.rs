//! Replace Cart Use Case
//!
//! Full cart replacement. Every supplied entry is validated before anything
//! is written, so a malformed entry fails the whole call instead of leaving
//! a partially applied cart.

use std::sync::Arc;

use crate::application::mutation::modify_account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, cart_entry::CartEntry, product_id::ProductId,
};
use crate::error::{IdentityError, IdentityResult};

/// One requested cart line
pub struct CartItemInput {
    pub product_id: String,
    pub quantity: u32,
}

/// Replace cart use case
pub struct ReplaceCartUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> ReplaceCartUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        items: Vec<CartItemInput>,
    ) -> IdentityResult<()> {
        // Validate the entire list up front
        let entries = items
            .into_iter()
            .map(|item| {
                let product_id = ProductId::new(item.product_id)
                    .map_err(|e| IdentityError::Validation(e.message().to_string()))?;
                CartEntry::new(product_id, item.quantity)
                    .map_err(|e| IdentityError::Validation(e.message().to_string()))
            })
            .collect::<IdentityResult<Vec<CartEntry>>>()?;

        let account = modify_account(&*self.repo, account_id, |account| {
            account.replace_cart(entries.clone());
            Ok(())
        })
        .await?;

        tracing::info!(
            account_id = %account_id,
            entries = account.cart.len(),
            "Cart replaced"
        );

        Ok(())
    }
}
