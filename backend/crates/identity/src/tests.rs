//! Use-case tests for the identity crate
//!
//! Runs the application layer against the in-memory store, with stub
//! verifiers and notifiers standing in for the external collaborators.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::application::{
    AddressBookUseCase, AddressInput, CartItemInput, IdentityConfig, LoginInput, LoginUseCase,
    ProviderLoginUseCase, RegisterInput, RegisterUseCase, ReplaceCartUseCase, ToggleWishlistUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::notifier::Notifier;
use crate::domain::provider::{IdentityVerifier, VerifiedIdentity};
use crate::domain::repository::{AccountRepository, UpdateOutcome};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, origin::AccountOrigin, phone_number::PhoneNumber,
};
use crate::error::{IdentityError, IdentityResult};
use crate::infra::memory::InMemoryAccountStore;

// ============================================================================
// Test doubles and helpers
// ============================================================================

/// Verifier that echoes the assertion back as the verified identity
#[derive(Clone)]
struct StubVerifier {
    origin: AccountOrigin,
    fail: bool,
}

impl StubVerifier {
    fn graph() -> Self {
        Self {
            origin: AccountOrigin::Graph,
            fail: false,
        }
    }

    fn oidc() -> Self {
        Self {
            origin: AccountOrigin::Oidc,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            origin: AccountOrigin::Graph,
            fail: true,
        }
    }
}

impl IdentityVerifier for StubVerifier {
    type Assertion = VerifiedIdentity;

    fn origin(&self) -> AccountOrigin {
        self.origin
    }

    async fn verify(&self, assertion: &VerifiedIdentity) -> IdentityResult<VerifiedIdentity> {
        if self.fail {
            return Err(IdentityError::ProviderVerificationFailed(
                "assertion rejected".to_string(),
            ));
        }
        Ok(assertion.clone())
    }
}

/// Notifier that records every send
#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str, number: &PhoneNumber) -> IdentityResult<()> {
        self.sent
            .lock()
            .push((message.to_string(), number.as_str().to_string()));
        Ok(())
    }
}

/// Notifier whose delivery always fails
#[derive(Clone)]
struct FailingNotifier;

impl Notifier for FailingNotifier {
    async fn send(&self, _message: &str, _number: &PhoneNumber) -> IdentityResult<()> {
        Err(IdentityError::Internal("gateway down".to_string()))
    }
}

fn config() -> Arc<IdentityConfig> {
    Arc::new(IdentityConfig::with_random_secret())
}

fn store() -> Arc<InMemoryAccountStore> {
    Arc::new(InMemoryAccountStore::new())
}

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        name: "Asha Rao".to_string(),
        email: email.to_string(),
        password: "CorrectHorse42!".to_string(),
        phone_number: "5551234567".to_string(),
    }
}

fn identity(email: &str, name: &str) -> VerifiedIdentity {
    VerifiedIdentity {
        email: email.to_string(),
        display_name: name.to_string(),
    }
}

fn address_input(name: &str) -> AddressInput {
    AddressInput {
        full_name: name.to_string(),
        number: "5551234567".to_string(),
        pin_code: "560001".to_string(),
        state: "Karnataka".to_string(),
        city: "Bengaluru".to_string(),
        house_number: "12B".to_string(),
        road_name: "MG Road".to_string(),
    }
}

/// Register an account and return its id
async fn registered_account(
    store: &Arc<InMemoryAccountStore>,
    config: &Arc<IdentityConfig>,
    email: &str,
) -> AccountId {
    let use_case = RegisterUseCase::new(
        store.clone(),
        Arc::new(RecordingNotifier::default()),
        config.clone(),
    );
    use_case.execute(register_input(email)).await.unwrap();

    store
        .find_by_email(&Email::new(email).unwrap())
        .await
        .unwrap()
        .unwrap()
        .account_id
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    panic!("condition not met in time");
}

// ============================================================================
// Registration
// ============================================================================

mod registration {
    use super::*;

    #[tokio::test]
    async fn register_then_login_succeeds() {
        let store = store();
        let config = config();
        registered_account(&store, &config, "a@x.com").await;

        let login = LoginUseCase::new(store.clone(), config.clone());
        let view = login
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "CorrectHorse42!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(view.email, "a@x.com");
        assert_eq!(view.display_name, "Asha Rao");
        assert_eq!(view.phone_number.as_deref(), Some("5551234567"));
        assert!(view.wishlist.is_empty());
        assert!(view.cart.is_empty());
        assert!(view.addresses.is_empty());
        assert!(!view.token.is_empty());
    }

    #[tokio::test]
    async fn each_login_issues_a_distinct_token() {
        let store = store();
        let config = config();
        registered_account(&store, &config, "a@x.com").await;

        let login = LoginUseCase::new(store.clone(), config.clone());
        let input = || LoginInput {
            email: "a@x.com".to_string(),
            password: "CorrectHorse42!".to_string(),
        };

        let first = login.execute(input()).await.unwrap();
        let second = login.execute(input()).await.unwrap();

        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let store = store();
        let config = config();
        let use_case = RegisterUseCase::new(
            store.clone(),
            Arc::new(RecordingNotifier::default()),
            config.clone(),
        );

        use_case
            .execute(register_input("a@x.com"))
            .await
            .unwrap();
        let second = use_case.execute(register_input("a@x.com")).await;

        assert!(matches!(second, Err(IdentityError::AlreadyRegistered)));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn registration_requires_all_fields() {
        let store = store();
        let use_case = RegisterUseCase::new(
            store.clone(),
            Arc::new(RecordingNotifier::default()),
            config(),
        );

        let mut input = register_input("a@x.com");
        input.name = String::new();
        let result = use_case.execute(input).await;

        assert!(matches!(result, Err(IdentityError::Validation(_))));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn registration_sends_welcome_notification() {
        let store = store();
        let notifier = RecordingNotifier::default();
        let use_case = RegisterUseCase::new(store.clone(), Arc::new(notifier.clone()), config());

        use_case.execute(register_input("a@x.com")).await.unwrap();

        wait_until(|| notifier.sent_count() == 1).await;
        let sent = notifier.sent.lock();
        assert_eq!(sent[0].1, "5551234567");
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_registration() {
        let store = store();
        let use_case = RegisterUseCase::new(store.clone(), Arc::new(FailingNotifier), config());

        let result = use_case.execute(register_input("a@x.com")).await;

        assert!(result.is_ok());
        assert_eq!(store.count(), 1);
    }
}

// ============================================================================
// Login
// ============================================================================

mod login {
    use super::*;

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let login = LoginUseCase::new(store(), config());

        let result = login
            .execute(LoginInput {
                email: "nobody@x.com".to_string(),
                password: "CorrectHorse42!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(IdentityError::AccountNotFound)));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let store = store();
        let config = config();
        registered_account(&store, &config, "a@x.com").await;

        let login = LoginUseCase::new(store.clone(), config.clone());
        let result = login
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "WrongHorse42!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn missing_fields_are_a_validation_error() {
        let login = LoginUseCase::new(store(), config());

        let result = login
            .execute(LoginInput {
                email: String::new(),
                password: "CorrectHorse42!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }

    #[tokio::test]
    async fn provider_origin_account_cannot_password_login() {
        let store = store();
        let config = config();

        let provider = ProviderLoginUseCase::new(
            store.clone(),
            Arc::new(StubVerifier::graph()),
            config.clone(),
        );
        provider
            .execute(&identity("fed@x.com", "Fed"))
            .await
            .unwrap();

        let login = LoginUseCase::new(store.clone(), config.clone());
        let result = login
            .execute(LoginInput {
                email: "fed@x.com".to_string(),
                password: "CorrectHorse42!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }
}

// ============================================================================
// Provider login and unification
// ============================================================================

mod provider_login {
    use super::*;

    #[tokio::test]
    async fn repeated_logins_resolve_to_one_account() {
        let store = store();
        let config = config();
        let use_case = ProviderLoginUseCase::new(
            store.clone(),
            Arc::new(StubVerifier::graph()),
            config.clone(),
        );

        let first = use_case.execute(&identity("u@x.com", "U")).await.unwrap();
        let second = use_case.execute(&identity("u@x.com", "U")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn unification_holds_across_providers() {
        let store = store();
        let config = config();

        let graph = ProviderLoginUseCase::new(
            store.clone(),
            Arc::new(StubVerifier::graph()),
            config.clone(),
        );
        let oidc = ProviderLoginUseCase::new(
            store.clone(),
            Arc::new(StubVerifier::oidc()),
            config.clone(),
        );

        let first = graph.execute(&identity("u@x.com", "U")).await.unwrap();
        let second = oidc.execute(&identity("u@x.com", "U")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.count(), 1);

        // Origin is fixed at creation, not overwritten by the second path
        let account = store
            .find_by_email(&Email::new("u@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.origin, AccountOrigin::Graph);
    }

    #[tokio::test]
    async fn provider_login_reuses_local_account_untouched() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let provider = ProviderLoginUseCase::new(
            store.clone(),
            Arc::new(StubVerifier::oidc()),
            config.clone(),
        );
        let view = provider
            .execute(&identity("a@x.com", "Different Name"))
            .await
            .unwrap();

        assert_eq!(view.id, account_id.to_string());
        assert_eq!(store.count(), 1);

        // Credential and origin survive the federated login
        let account = store
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.origin, AccountOrigin::Local);
        assert!(account.credential.is_some());

        let login = LoginUseCase::new(store.clone(), config.clone());
        assert!(
            login
                .execute(LoginInput {
                    email: "a@x.com".to_string(),
                    password: "CorrectHorse42!".to_string(),
                })
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn identity_without_email_is_a_validation_error() {
        let store = store();
        let use_case =
            ProviderLoginUseCase::new(store.clone(), Arc::new(StubVerifier::graph()), config());

        let result = use_case.execute(&identity("", "U")).await;

        assert!(matches!(result, Err(IdentityError::Validation(_))));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn verifier_failure_creates_no_account() {
        let store = store();
        let use_case =
            ProviderLoginUseCase::new(store.clone(), Arc::new(StubVerifier::failing()), config());

        let result = use_case.execute(&identity("u@x.com", "U")).await;

        assert!(matches!(
            result,
            Err(IdentityError::ProviderVerificationFailed(_))
        ));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn view_shape_matches_local_login() {
        let store = store();
        let config = config();
        registered_account(&store, &config, "a@x.com").await;

        let login = LoginUseCase::new(store.clone(), config.clone());
        let local_view = login
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "CorrectHorse42!".to_string(),
            })
            .await
            .unwrap();

        let provider = ProviderLoginUseCase::new(
            store.clone(),
            Arc::new(StubVerifier::graph()),
            config.clone(),
        );
        let provider_view = provider
            .execute(&identity("a@x.com", "Ignored"))
            .await
            .unwrap();

        // Same account projected the same way, tokens aside
        assert_eq!(local_view.id, provider_view.id);
        assert_eq!(local_view.display_name, provider_view.display_name);
        assert_eq!(local_view.email, provider_view.email);
        assert_eq!(local_view.phone_number, provider_view.phone_number);
    }
}

// ============================================================================
// Wishlist
// ============================================================================

mod wishlist {
    use super::*;

    #[tokio::test]
    async fn toggling_twice_restores_the_wishlist() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = ToggleWishlistUseCase::new(store.clone());

        let first = use_case
            .execute(&account_id, "sku-1".to_string())
            .await
            .unwrap();
        assert!(first.in_wishlist);

        let second = use_case
            .execute(&account_id, "sku-1".to_string())
            .await
            .unwrap();
        assert!(!second.in_wishlist);

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert!(account.wishlist.is_empty());
    }

    #[tokio::test]
    async fn empty_product_id_is_a_validation_error() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = ToggleWishlistUseCase::new(store.clone());
        let result = use_case.execute(&account_id, "  ".to_string()).await;

        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }
}

// ============================================================================
// Cart
// ============================================================================

mod cart {
    use super::*;

    fn items(entries: &[(&str, u32)]) -> Vec<CartItemInput> {
        entries
            .iter()
            .map(|(id, qty)| CartItemInput {
                product_id: id.to_string(),
                quantity: *qty,
            })
            .collect()
    }

    #[tokio::test]
    async fn duplicate_product_ids_collapse_last_wins() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = ReplaceCartUseCase::new(store.clone());
        use_case
            .execute(&account_id, items(&[("sku-1", 1), ("sku-2", 2), ("sku-1", 5)]))
            .await
            .unwrap();

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert_eq!(account.cart.len(), 2);
        assert_eq!(account.cart[0].product_id.as_str(), "sku-1");
        assert_eq!(account.cart[0].quantity, 5);
        assert_eq!(account.cart[1].product_id.as_str(), "sku-2");
    }

    #[tokio::test]
    async fn replacing_twice_is_idempotent() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = ReplaceCartUseCase::new(store.clone());
        use_case
            .execute(&account_id, items(&[("sku-1", 1), ("sku-2", 2)]))
            .await
            .unwrap();
        let first = store.find_by_id(&account_id).await.unwrap().unwrap().cart;

        use_case
            .execute(&account_id, items(&[("sku-1", 1), ("sku-2", 2)]))
            .await
            .unwrap();
        let second = store.find_by_id(&account_id).await.unwrap().unwrap().cart;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn malformed_entry_fails_the_whole_call() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = ReplaceCartUseCase::new(store.clone());
        use_case
            .execute(&account_id, items(&[("sku-1", 1)]))
            .await
            .unwrap();

        // Zero quantity rejects the request before anything is written
        let result = use_case
            .execute(&account_id, items(&[("sku-2", 3), ("sku-3", 0)]))
            .await;
        assert!(matches!(result, Err(IdentityError::Validation(_))));

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert_eq!(account.cart.len(), 1);
        assert_eq!(account.cart[0].product_id.as_str(), "sku-1");
    }
}

// ============================================================================
// Address book
// ============================================================================

mod addresses {
    use super::*;

    #[tokio::test]
    async fn deleting_shifts_subsequent_entries() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = AddressBookUseCase::new(store.clone());
        use_case
            .add(&account_id, address_input("First"))
            .await
            .unwrap();
        use_case
            .add(&account_id, address_input("Second"))
            .await
            .unwrap();

        use_case.delete(&account_id, 0).await.unwrap();

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert_eq!(account.addresses.len(), 1);
        assert_eq!(account.addresses[0].full_name, "Second");
    }

    #[tokio::test]
    async fn add_returns_the_full_updated_list() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = AddressBookUseCase::new(store.clone());
        let first = use_case
            .add(&account_id, address_input("First"))
            .await
            .unwrap();
        assert_eq!(first.len(), 1);

        let second = use_case
            .add(&account_id, address_input("Second"))
            .await
            .unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].full_name, "Second");
    }

    #[tokio::test]
    async fn delete_out_of_range_is_rejected() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = AddressBookUseCase::new(store.clone());
        let result = use_case.delete(&account_id, 0).await;

        assert!(matches!(
            result,
            Err(IdentityError::AddressIndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[tokio::test]
    async fn edit_out_of_range_leaves_the_list_unchanged() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = AddressBookUseCase::new(store.clone());
        use_case
            .add(&account_id, address_input("Only"))
            .await
            .unwrap();

        let result = use_case
            .edit(&account_id, 5, address_input("Replacement"))
            .await;
        assert!(matches!(
            result,
            Err(IdentityError::AddressIndexOutOfRange { index: 5, len: 1 })
        ));

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert_eq!(account.addresses[0].full_name, "Only");
    }

    #[tokio::test]
    async fn edit_overwrites_the_full_record() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = AddressBookUseCase::new(store.clone());
        use_case
            .add(&account_id, address_input("Old"))
            .await
            .unwrap();

        let updated = use_case
            .edit(&account_id, 0, address_input("New"))
            .await
            .unwrap();

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].full_name, "New");
    }

    #[tokio::test]
    async fn incomplete_address_is_a_validation_error() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = AddressBookUseCase::new(store.clone());
        let mut input = address_input("First");
        input.pin_code = String::new();

        let result = use_case.add(&account_id, input).await;
        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }
}

// ============================================================================
// Profile
// ============================================================================

mod profile {
    use super::*;

    #[tokio::test]
    async fn at_least_one_field_is_required() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = UpdateProfileUseCase::new(store.clone());
        let result = use_case
            .execute(
                &account_id,
                UpdateProfileInput {
                    name: None,
                    phone_number: None,
                },
            )
            .await;

        assert!(matches!(result, Err(IdentityError::Validation(_))));
    }

    #[tokio::test]
    async fn supplied_fields_update_independently() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let use_case = UpdateProfileUseCase::new(store.clone());
        use_case
            .execute(
                &account_id,
                UpdateProfileInput {
                    name: Some("Renamed".to_string()),
                    phone_number: None,
                },
            )
            .await
            .unwrap();

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert_eq!(account.display_name.as_str(), "Renamed");
        assert_eq!(
            account.phone_number.as_ref().map(|n| n.as_str()),
            Some("5551234567")
        );
    }
}

// ============================================================================
// Store semantics
// ============================================================================

mod store_semantics {
    use super::*;
    use crate::domain::value_object::display_name::DisplayName;

    #[tokio::test]
    async fn stale_version_update_is_a_conflict() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        let stale = store.find_by_id(&account_id).await.unwrap().unwrap();

        // A competing writer advances the version first
        let mut fresh = stale.clone();
        fresh.set_display_name(DisplayName::new("Fresh").unwrap());
        assert_eq!(store.update(&fresh).await.unwrap(), UpdateOutcome::Applied);

        // The stale copy no longer matches and applies nothing
        let mut late = stale;
        late.set_display_name(DisplayName::new("Late").unwrap());
        assert_eq!(
            store.update(&late).await.unwrap(),
            UpdateOutcome::VersionConflict
        );

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert_eq!(account.display_name.as_str(), "Fresh");
    }

    #[tokio::test]
    async fn contended_mutation_retries_and_lands() {
        let store = store();
        let config = config();
        let account_id = registered_account(&store, &config, "a@x.com").await;

        // Two concurrent toggles on different products both land thanks to
        // the conditional-update retry loop
        let use_case = ToggleWishlistUseCase::new(store.clone());
        let (a, b) = tokio::join!(
            use_case.execute(&account_id, "sku-1".to_string()),
            use_case.execute(&account_id, "sku-2".to_string()),
        );
        a.unwrap();
        b.unwrap();

        let account = store.find_by_id(&account_id).await.unwrap().unwrap();
        assert_eq!(account.wishlist.len(), 2);
    }
}
