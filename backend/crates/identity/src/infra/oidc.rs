//! OIDC Provider Verifier
//!
//! Verifies an ID token against the provider's token-info endpoint and
//! checks that the token was minted for this application (audience match).

use serde::Deserialize;

use crate::domain::provider::{IdentityVerifier, VerifiedIdentity};
use crate::domain::value_object::origin::AccountOrigin;
use crate::error::{IdentityError, IdentityResult};

/// OIDC login assertion: the ID token issued to the client
#[derive(Debug, Clone)]
pub struct OidcAssertion {
    pub id_token: String,
}

/// OIDC identity verifier
#[derive(Debug, Clone)]
pub struct OidcIdentityVerifier {
    http: reqwest::Client,
    token_info_url: String,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenInfoClaims {
    aud: Option<String>,
    email: Option<String>,
    name: Option<String>,
}

impl OidcIdentityVerifier {
    pub fn new(token_info_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_info_url: token_info_url.into(),
            client_id: client_id.into(),
        }
    }
}

impl IdentityVerifier for OidcIdentityVerifier {
    type Assertion = OidcAssertion;

    fn origin(&self) -> AccountOrigin {
        AccountOrigin::Oidc
    }

    async fn verify(&self, assertion: &OidcAssertion) -> IdentityResult<VerifiedIdentity> {
        let response = self
            .http
            .get(&self.token_info_url)
            .query(&[("id_token", assertion.id_token.as_str())])
            .send()
            .await
            .map_err(|e| IdentityError::ProviderVerificationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError::ProviderVerificationFailed(format!(
                "token info endpoint returned {}",
                response.status()
            )));
        }

        let claims: TokenInfoClaims = response
            .json()
            .await
            .map_err(|e| IdentityError::ProviderVerificationFailed(e.to_string()))?;

        // The token must have been issued to this application
        if claims.aud.as_deref() != Some(self.client_id.as_str()) {
            return Err(IdentityError::ProviderVerificationFailed(
                "audience mismatch".to_string(),
            ));
        }

        Ok(VerifiedIdentity {
            email: claims.email.unwrap_or_default(),
            display_name: claims.name.unwrap_or_default(),
        })
    }
}
