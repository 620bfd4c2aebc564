//! Product Identifier Value Object
//!
//! Opaque catalog identifier referenced from wishlists and carts. The
//! identity service never dereferences it; it only guards the format so a
//! malformed id cannot be persisted into an account's collections.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum product id length
pub const PRODUCT_ID_MAX_LENGTH: usize = 64;

/// Product identifier value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product id with validation
    pub fn new(id: impl Into<String>) -> AppResult<Self> {
        let id = id.into().trim().to_string();

        if id.is_empty() {
            return Err(AppError::bad_request("Product id cannot be empty"));
        }

        if id.len() > PRODUCT_ID_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Product id must be at most {} characters",
                PRODUCT_ID_MAX_LENGTH
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AppError::bad_request("Product id is malformed"));
        }

        Ok(Self(id))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_valid() {
        assert!(ProductId::new("5f8d0d55b54764421b7156c3").is_ok());
        assert!(ProductId::new("sku_TSHIRT-42").is_ok());
    }

    #[test]
    fn test_product_id_invalid() {
        assert!(ProductId::new("").is_err());
        assert!(ProductId::new("  ").is_err());
        assert!(ProductId::new("has space").is_err());
        assert!(ProductId::new("semi;colon").is_err());
        assert!(ProductId::new("x".repeat(PRODUCT_ID_MAX_LENGTH + 1)).is_err());
    }
}
