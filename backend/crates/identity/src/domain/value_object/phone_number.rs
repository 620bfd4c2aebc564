//! Phone Number Value Object
//!
//! Required at local registration (the welcome notification goes out over
//! SMS); absent for provider-created accounts until the owner supplies one.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum phone number length (E.164 plus formatting slack)
pub const PHONE_NUMBER_MAX_LENGTH: usize = 20;

/// Characters allowed besides digits
const ALLOWED_SYMBOLS: &[char] = &['+', '-', ' ', '(', ')'];

/// Phone number value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new phone number with validation
    pub fn new(number: impl Into<String>) -> AppResult<Self> {
        let number = number.into().trim().to_string();

        if number.is_empty() {
            return Err(AppError::bad_request("Phone number cannot be empty"));
        }

        if number.len() > PHONE_NUMBER_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Phone number must be at most {} characters",
                PHONE_NUMBER_MAX_LENGTH
            )));
        }

        if !number
            .chars()
            .all(|c| c.is_ascii_digit() || ALLOWED_SYMBOLS.contains(&c))
        {
            return Err(AppError::bad_request(
                "Phone number contains invalid characters",
            ));
        }

        if !number.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request("Phone number must contain digits"));
        }

        Ok(Self(number))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Get the number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
