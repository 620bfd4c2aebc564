//! Identity Router

use axum::{Router, middleware, routing::post};

use crate::domain::repository::AccountRepository;
use crate::infra::PgAccountStore;
use crate::presentation::handlers::{self, IdentityAppState};
use crate::presentation::middleware::require_account;

/// Create the identity router with the PostgreSQL store
pub fn identity_router(state: IdentityAppState<PgAccountStore>) -> Router {
    identity_router_generic(state)
}

/// Create a generic identity router for any store implementation
pub fn identity_router_generic<R>(state: IdentityAppState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let gate_config = state.config.clone();

    // Everything below the gate acts on the token-resolved account only
    let protected = Router::new()
        .route("/wishlist/toggle", post(handlers::toggle_wishlist::<R>))
        .route("/cart", post(handlers::replace_cart::<R>))
        .route("/addresses", post(handlers::add_address::<R>))
        .route("/addresses/delete", post(handlers::delete_address::<R>))
        .route("/addresses/edit", post(handlers::edit_address::<R>))
        .route("/profile", post(handlers::update_profile::<R>))
        .layer(middleware::from_fn(
            move |req: axum::extract::Request, next: middleware::Next| {
                let config = gate_config.clone();
                async move { require_account(config, req, next).await }
            },
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/login/graph", post(handlers::login_graph::<R>))
        .route("/login/oidc", post(handlers::login_oidc::<R>))
        .merge(protected)
        .with_state(state)
}
