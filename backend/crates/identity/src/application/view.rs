//! Canonical Account View
//!
//! The one response projection shared by every successful authentication
//! path (local login, Graph login, OIDC login). Keeping a single projection
//! function is what stops the three flows from drifting into inconsistent
//! response shapes. The credential hash is not part of this type and can
//! never be serialized.

use serde::Serialize;

use crate::domain::entity::account::Account;
use crate::domain::value_object::{address::Address, cart_entry::CartEntry};

/// Canonical account view returned with a fresh token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub wishlist: Vec<String>,
    pub cart: Vec<CartItemView>,
    pub addresses: Vec<AddressView>,
    pub token: String,
}

/// Cart line in API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: String,
    pub quantity: u32,
}

/// Address record in API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressView {
    pub full_name: String,
    pub number: String,
    pub pin_code: String,
    pub state: String,
    pub city: String,
    pub house_number: String,
    pub road_name: String,
}

impl AccountView {
    /// Project an account plus a freshly issued token
    pub fn project(account: &Account, token: String) -> Self {
        Self {
            id: account.account_id.to_string(),
            display_name: account.display_name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            phone_number: account.phone_number.as_ref().map(|n| n.as_str().to_string()),
            wishlist: account.wishlist.iter().map(|p| p.as_str().to_string()).collect(),
            cart: account.cart.iter().map(CartItemView::from).collect(),
            addresses: account.addresses.iter().map(AddressView::from).collect(),
            token,
        }
    }
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            product_id: entry.product_id.as_str().to_string(),
            quantity: entry.quantity,
        }
    }
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            full_name: address.full_name.clone(),
            number: address.number.clone(),
            pin_code: address.pin_code.clone(),
            state: address.state.clone(),
            city: address.city.clone(),
            house_number: address.house_number.clone(),
            road_name: address.road_name.clone(),
        }
    }
}
