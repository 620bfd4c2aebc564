//! Authentication Gate Middleware
//!
//! Every collection-mutator route passes through here first. The gate
//! resolves the bearer token to an account id and stores it in request
//! extensions; handlers only ever act on the gate-resolved id, never on a
//! client-supplied one.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::IdentityConfig;
use crate::domain::value_object::account_id::AccountId;
use crate::error::IdentityError;

/// Caller identity resolved from the bearer token
#[derive(Clone, Copy)]
pub struct CurrentAccount(pub AccountId);

/// Middleware that requires a valid bearer token
pub async fn require_account(
    config: Arc<IdentityConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = bearer_token(&req) else {
        return Err(IdentityError::Unauthenticated.into_response());
    };

    let subject = config
        .token_issuer()
        .resolve(&token)
        .map_err(|_| IdentityError::Unauthenticated.into_response())?;

    let account_id = subject
        .parse::<Uuid>()
        .map(AccountId::from_uuid)
        .map_err(|_| IdentityError::Unauthenticated.into_response())?;

    req.extensions_mut().insert(CurrentAccount(account_id));

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}
