//! API DTOs (Data Transfer Objects)
//!
//! Successful authentication responses use the canonical
//! [`crate::application::view::AccountView`] directly; the types here cover
//! requests and the remaining response shapes.

use serde::{Deserialize, Serialize};

use crate::application::view::AddressView;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Provider logins
// ============================================================================

/// Graph provider login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLoginRequest {
    pub access_token: String,
    pub user_id: String,
}

/// OIDC provider login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcLoginRequest {
    pub id_token: String,
}

// ============================================================================
// Collections
// ============================================================================

/// Wishlist toggle request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleWishlistRequest {
    pub product_id: String,
}

/// Cart replacement request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceCartRequest {
    pub items: Vec<CartItemPayload>,
}

/// One requested cart line
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPayload {
    pub product_id: String,
    pub quantity: u32,
}

/// Full address record payload (all seven fields required)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    pub full_name: String,
    pub number: String,
    pub pin_code: String,
    pub state: String,
    pub city: String,
    pub house_number: String,
    pub road_name: String,
}

/// Address deletion request (positional index)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAddressRequest {
    pub index: usize,
}

/// Address edit request: positional index plus the full replacement record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAddressRequest {
    pub index: usize,
    pub address: AddressPayload,
}

/// Profile update request; at least one field must be supplied
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Simple acknowledgment response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full address list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressListResponse {
    pub addresses: Vec<AddressView>,
}
