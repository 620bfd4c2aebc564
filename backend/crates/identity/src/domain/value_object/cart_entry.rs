//! Cart Entry Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::product_id::ProductId;

/// One cart line: a product and how many of it
///
/// A cart never holds two entries for the same product; replacing the cart
/// collapses duplicates (see `Account::replace_cart`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartEntry {
    /// Create a new cart entry with validation
    pub fn new(product_id: ProductId, quantity: u32) -> AppResult<Self> {
        if quantity == 0 {
            return Err(AppError::bad_request("Quantity must be at least 1"));
        }

        Ok(Self {
            product_id,
            quantity,
        })
    }
}
