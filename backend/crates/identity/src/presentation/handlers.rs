//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::view::AccountView;
use crate::application::{
    AddressBookUseCase, AddressInput, CartItemInput, IdentityConfig, LoginInput, LoginUseCase,
    ProviderLoginUseCase, RegisterInput, RegisterUseCase, ReplaceCartUseCase,
    ToggleWishlistUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::AccountRepository;
use crate::error::IdentityResult;
use crate::infra::{
    GraphAssertion, GraphIdentityVerifier, OidcAssertion, OidcIdentityVerifier, SmsNotifier,
};
use crate::presentation::dto::{
    AddressListResponse, AddressPayload, DeleteAddressRequest, EditAddressRequest,
    GraphLoginRequest, LoginRequest, MessageResponse, OidcLoginRequest, RegisterRequest,
    ReplaceCartRequest, ToggleWishlistRequest, UpdateProfileRequest,
};
use crate::presentation::middleware::CurrentAccount;

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub store: Arc<R>,
    pub graph_verifier: Arc<GraphIdentityVerifier>,
    pub oidc_verifier: Arc<OidcIdentityVerifier>,
    pub notifier: Arc<SmsNotifier>,
    pub config: Arc<IdentityConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<(StatusCode, Json<MessageResponse>)>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.store.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        password: req.password,
        phone_number: req.phone_number,
    };

    use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Account registered successfully")),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<Json<AccountView>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.store.clone(), state.config.clone());

    let view = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(view))
}

/// POST /login/graph
pub async fn login_graph<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<GraphLoginRequest>,
) -> IdentityResult<Json<AccountView>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProviderLoginUseCase::new(
        state.store.clone(),
        state.graph_verifier.clone(),
        state.config.clone(),
    );

    let assertion = GraphAssertion {
        access_token: req.access_token,
        subject_id: req.user_id,
    };

    let view = use_case.execute(&assertion).await?;

    Ok(Json(view))
}

/// POST /login/oidc
pub async fn login_oidc<R>(
    State(state): State<IdentityAppState<R>>,
    Json(req): Json<OidcLoginRequest>,
) -> IdentityResult<Json<AccountView>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProviderLoginUseCase::new(
        state.store.clone(),
        state.oidc_verifier.clone(),
        state.config.clone(),
    );

    let assertion = OidcAssertion {
        id_token: req.id_token,
    };

    let view = use_case.execute(&assertion).await?;

    Ok(Json(view))
}

// ============================================================================
// Wishlist / Cart
// ============================================================================

/// POST /wishlist/toggle
pub async fn toggle_wishlist<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(req): Json<ToggleWishlistRequest>,
) -> IdentityResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = ToggleWishlistUseCase::new(state.store.clone());

    use_case.execute(&account_id, req.product_id).await?;

    Ok(Json(MessageResponse::new("Wishlist updated")))
}

/// POST /cart
pub async fn replace_cart<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(req): Json<ReplaceCartRequest>,
) -> IdentityResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = ReplaceCartUseCase::new(state.store.clone());

    let items = req
        .items
        .into_iter()
        .map(|item| CartItemInput {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    use_case.execute(&account_id, items).await?;

    Ok(Json(MessageResponse::new("Cart updated")))
}

// ============================================================================
// Addresses
// ============================================================================

/// POST /addresses
pub async fn add_address<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(req): Json<AddressPayload>,
) -> IdentityResult<(StatusCode, Json<AddressListResponse>)>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddressBookUseCase::new(state.store.clone());

    let addresses = use_case.add(&account_id, address_input(req)).await?;

    Ok((StatusCode::CREATED, Json(AddressListResponse { addresses })))
}

/// POST /addresses/delete
pub async fn delete_address<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(req): Json<DeleteAddressRequest>,
) -> IdentityResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddressBookUseCase::new(state.store.clone());

    use_case.delete(&account_id, req.index).await?;

    Ok(Json(MessageResponse::new("Address deleted")))
}

/// POST /addresses/edit
pub async fn edit_address<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(req): Json<EditAddressRequest>,
) -> IdentityResult<Json<AddressListResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddressBookUseCase::new(state.store.clone());

    // req のムーブ後も使えるように index を退避
    let index = req.index;

    let addresses = use_case
        .edit(&account_id, index, address_input(req.address))
        .await?;

    Ok(Json(AddressListResponse { addresses }))
}

// ============================================================================
// Profile
// ============================================================================

/// POST /profile
pub async fn update_profile<R>(
    State(state): State<IdentityAppState<R>>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
    Json(req): Json<UpdateProfileRequest>,
) -> IdentityResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.store.clone());

    let input = UpdateProfileInput {
        name: req.name,
        phone_number: req.number,
    };

    use_case.execute(&account_id, input).await?;

    Ok(Json(MessageResponse::new("Profile updated")))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn address_input(payload: AddressPayload) -> AddressInput {
    AddressInput {
        full_name: payload.full_name,
        number: payload.number,
        pin_code: payload.pin_code,
        state: payload.state,
        city: payload.city,
        house_number: payload.house_number,
        road_name: payload.road_name,
    }
}
