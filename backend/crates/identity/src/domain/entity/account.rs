//! Account Entity
//!
//! The single record unifying local and federated sign-ins, keyed by email.
//! Also owns the per-account collections (wishlist, cart, addresses).

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, address::Address, cart_entry::CartEntry, credential::StoredCredential,
    display_name::DisplayName, email::Email, origin::AccountOrigin, phone_number::PhoneNumber,
    product_id::ProductId,
};

/// Account entity
///
/// Invariants:
/// - `credential` is present if and only if `origin == Local`
/// - `cart` never holds two entries for the same product id
/// - `version` is the record version last read from the store; updates are
///   conditional on it (compare-and-set)
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier, assigned at creation
    pub account_id: AccountId,
    /// Unique identity key across all origins
    pub email: Email,
    /// Human-readable name
    pub display_name: DisplayName,
    /// Contact number; required for local registration, absent for
    /// provider-created accounts until the owner sets one
    pub phone_number: Option<PhoneNumber>,
    /// Password credential (Local origin only)
    pub credential: Option<StoredCredential>,
    /// Authentication path that created the account
    pub origin: AccountOrigin,
    /// Saved product ids, duplicate-free, order not significant
    pub wishlist: Vec<ProductId>,
    /// Cart lines, at most one per product id
    pub cart: Vec<CartEntry>,
    /// Shipping addresses, referenced by position from clients
    pub addresses: Vec<Address>,
    /// Store record version for conditional updates
    pub version: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create an account from a local registration
    pub fn register_local(
        email: Email,
        display_name: DisplayName,
        phone_number: PhoneNumber,
        credential: StoredCredential,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            display_name,
            phone_number: Some(phone_number),
            credential: Some(credential),
            origin: AccountOrigin::Local,
            wishlist: Vec::new(),
            cart: Vec::new(),
            addresses: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an account from a verified provider identity
    pub fn from_provider(email: Email, display_name: DisplayName, origin: AccountOrigin) -> Self {
        debug_assert!(!origin.has_credential(), "provider origin expected");
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            display_name,
            phone_number: None,
            credential: None,
            origin,
            wishlist: Vec::new(),
            cart: Vec::new(),
            addresses: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Toggle wishlist membership for a product
    ///
    /// Returns whether the product is present after the call.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        match self.wishlist.iter().position(|p| *p == product_id) {
            Some(index) => {
                self.wishlist.remove(index);
                self.touch();
                false
            }
            None => {
                self.wishlist.push(product_id);
                self.touch();
                true
            }
        }
    }

    /// Replace the cart wholesale
    ///
    /// Duplicate product ids collapse to a single entry: the entry keeps the
    /// position of the first occurrence and the quantity of the last.
    pub fn replace_cart(&mut self, items: Vec<CartEntry>) {
        let mut cart: Vec<CartEntry> = Vec::with_capacity(items.len());

        for entry in items {
            match cart.iter_mut().find(|e| e.product_id == entry.product_id) {
                Some(existing) => *existing = entry,
                None => cart.push(entry),
            }
        }

        self.cart = cart;
        self.touch();
    }

    /// Append an address to the end of the list
    pub fn add_address(&mut self, address: Address) {
        self.addresses.push(address);
        self.touch();
    }

    /// Remove the address at `index`, shifting subsequent entries down
    ///
    /// Returns `None` without mutating when the index is out of range.
    pub fn remove_address(&mut self, index: usize) -> Option<Address> {
        if index >= self.addresses.len() {
            return None;
        }
        let removed = self.addresses.remove(index);
        self.touch();
        Some(removed)
    }

    /// Overwrite the address at `index` with a full replacement record
    ///
    /// Returns `false` without mutating when the index is out of range.
    pub fn replace_address(&mut self, index: usize, address: Address) -> bool {
        match self.addresses.get_mut(index) {
            Some(slot) => {
                *slot = address;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Update the display name
    pub fn set_display_name(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
        self.touch();
    }

    /// Update the phone number
    pub fn set_phone_number(&mut self, phone_number: PhoneNumber) {
        self.phone_number = Some(phone_number);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::credential::RawPassword;

    fn local_account() -> Account {
        let raw = RawPassword::new("CorrectHorse42!".to_string()).unwrap();
        Account::register_local(
            Email::new("a@x.com").unwrap(),
            DisplayName::new("A").unwrap(),
            PhoneNumber::new("5551234567").unwrap(),
            StoredCredential::from_raw(&raw, None).unwrap(),
        )
    }

    fn provider_account() -> Account {
        Account::from_provider(
            Email::new("b@x.com").unwrap(),
            DisplayName::new("B").unwrap(),
            AccountOrigin::Graph,
        )
    }

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    fn address(name: &str) -> Address {
        Address::new(name, "5551234567", "560001", "Karnataka", "Bengaluru", "12B", "MG Road")
            .unwrap()
    }

    #[test]
    fn test_credential_present_iff_local() {
        assert!(local_account().credential.is_some());
        assert!(provider_account().credential.is_none());
    }

    #[test]
    fn test_provider_account_has_no_phone() {
        assert!(provider_account().phone_number.is_none());
    }

    #[test]
    fn test_toggle_wishlist_is_involution() {
        let mut account = local_account();

        assert!(account.toggle_wishlist(pid("sku-1")));
        assert_eq!(account.wishlist, vec![pid("sku-1")]);

        assert!(!account.toggle_wishlist(pid("sku-1")));
        assert!(account.wishlist.is_empty());
    }

    #[test]
    fn test_replace_cart_collapses_duplicates_last_wins() {
        let mut account = local_account();

        account.replace_cart(vec![
            CartEntry::new(pid("sku-1"), 1).unwrap(),
            CartEntry::new(pid("sku-2"), 2).unwrap(),
            CartEntry::new(pid("sku-1"), 5).unwrap(),
        ]);

        assert_eq!(account.cart.len(), 2);
        assert_eq!(account.cart[0].product_id, pid("sku-1"));
        assert_eq!(account.cart[0].quantity, 5);
        assert_eq!(account.cart[1].product_id, pid("sku-2"));
    }

    #[test]
    fn test_replace_cart_is_idempotent() {
        let mut account = local_account();
        let items = vec![
            CartEntry::new(pid("sku-1"), 1).unwrap(),
            CartEntry::new(pid("sku-2"), 2).unwrap(),
        ];

        account.replace_cart(items.clone());
        let first = account.cart.clone();
        account.replace_cart(items);

        assert_eq!(account.cart, first);
    }

    #[test]
    fn test_remove_address_shifts_subsequent_entries() {
        let mut account = local_account();
        account.add_address(address("First"));
        account.add_address(address("Second"));

        let removed = account.remove_address(0).unwrap();
        assert_eq!(removed.full_name, "First");
        assert_eq!(account.addresses.len(), 1);
        assert_eq!(account.addresses[0].full_name, "Second");
    }

    #[test]
    fn test_remove_address_out_of_range_leaves_list() {
        let mut account = local_account();
        account.add_address(address("Only"));

        assert!(account.remove_address(1).is_none());
        assert_eq!(account.addresses.len(), 1);
    }

    #[test]
    fn test_replace_address_out_of_range_leaves_list() {
        let mut account = local_account();
        account.add_address(address("Only"));

        assert!(!account.replace_address(3, address("Other")));
        assert_eq!(account.addresses[0].full_name, "Only");
    }
}
