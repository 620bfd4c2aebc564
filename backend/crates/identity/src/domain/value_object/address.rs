//! Shipping Address Value Object
//!
//! Full-record semantics: every field is required, and edits overwrite the
//! whole record. Clients reference addresses by position in the account's
//! address list, so an address has no identity of its own.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum length for any single address field
pub const ADDRESS_FIELD_MAX_LENGTH: usize = 120;

/// Shipping address record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub number: String,
    pub pin_code: String,
    pub state: String,
    pub city: String,
    pub house_number: String,
    pub road_name: String,
}

impl Address {
    /// Create a new address, validating that all seven fields are present
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        full_name: impl Into<String>,
        number: impl Into<String>,
        pin_code: impl Into<String>,
        state: impl Into<String>,
        city: impl Into<String>,
        house_number: impl Into<String>,
        road_name: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            full_name: required("fullName", full_name)?,
            number: required("number", number)?,
            pin_code: required("pinCode", pin_code)?,
            state: required("state", state)?,
            city: required("city", city)?,
            house_number: required("houseNumber", house_number)?,
            road_name: required("roadName", road_name)?,
        })
    }
}

fn required(field: &str, value: impl Into<String>) -> AppResult<String> {
    let value = value.into().trim().to_string();

    if value.is_empty() {
        return Err(AppError::bad_request(format!(
            "Address field '{}' is required",
            field
        )));
    }

    if value.chars().count() > ADDRESS_FIELD_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "Address field '{}' must be at most {} characters",
            field, ADDRESS_FIELD_MAX_LENGTH
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppResult<Address> {
        Address::new(
            "Asha Rao",
            "5551234567",
            "560001",
            "Karnataka",
            "Bengaluru",
            "12B",
            "MG Road",
        )
    }

    #[test]
    fn test_address_valid() {
        let address = sample().unwrap();
        assert_eq!(address.city, "Bengaluru");
        assert_eq!(address.house_number, "12B");
    }

    #[test]
    fn test_address_missing_field() {
        let result = Address::new("Asha Rao", "", "560001", "Karnataka", "Bengaluru", "12B", "MG Road");
        assert!(result.is_err());
    }

    #[test]
    fn test_address_whitespace_field() {
        let result = Address::new("Asha Rao", "5551234567", "   ", "Karnataka", "Bengaluru", "12B", "MG Road");
        assert!(result.is_err());
    }

    #[test]
    fn test_address_field_too_long() {
        let long = "x".repeat(ADDRESS_FIELD_MAX_LENGTH + 1);
        let result = Address::new(long, "5551234567", "560001", "Karnataka", "Bengaluru", "12B", "MG Road");
        assert!(result.is_err());
    }
}
