//! Toggle Wishlist Use Case
//!
//! A pure toggle: the call inverts membership, so applying it twice returns
//! the wishlist to its original state. There are no separate add/remove
//! operations.

use std::sync::Arc;

use crate::application::mutation::modify_account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, product_id::ProductId};
use crate::error::{IdentityError, IdentityResult};

/// Toggle wishlist output
pub struct ToggleWishlistOutput {
    /// Whether the product is in the wishlist after the call
    pub in_wishlist: bool,
}

/// Toggle wishlist use case
pub struct ToggleWishlistUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> ToggleWishlistUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        product_id: String,
    ) -> IdentityResult<ToggleWishlistOutput> {
        let product_id = ProductId::new(product_id)
            .map_err(|e| IdentityError::Validation(e.message().to_string()))?;

        let mut in_wishlist = false;
        modify_account(&*self.repo, account_id, |account| {
            in_wishlist = account.toggle_wishlist(product_id.clone());
            Ok(())
        })
        .await?;

        tracing::info!(
            account_id = %account_id,
            product_id = %product_id,
            in_wishlist,
            "Wishlist toggled"
        );

        Ok(ToggleWishlistOutput { in_wishlist })
    }
}
