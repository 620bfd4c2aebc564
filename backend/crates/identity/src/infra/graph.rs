//! Graph Provider Verifier
//!
//! Verifies a client-supplied access token by fetching the subject's profile
//! from the provider's graph endpoint. An assertion the provider rejects, or
//! a transport failure, fails verification; profile fields the provider
//! omits come back empty and are rejected downstream.

use serde::Deserialize;

use crate::domain::provider::{IdentityVerifier, VerifiedIdentity};
use crate::domain::value_object::origin::AccountOrigin;
use crate::error::{IdentityError, IdentityResult};

/// Graph login assertion: an access token plus the subject it claims
#[derive(Debug, Clone)]
pub struct GraphAssertion {
    pub access_token: String,
    pub subject_id: String,
}

/// Graph-style identity verifier
#[derive(Debug, Clone)]
pub struct GraphIdentityVerifier {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GraphProfile {
    email: Option<String>,
    name: Option<String>,
}

impl GraphIdentityVerifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl IdentityVerifier for GraphIdentityVerifier {
    type Assertion = GraphAssertion;

    fn origin(&self) -> AccountOrigin {
        AccountOrigin::Graph
    }

    async fn verify(&self, assertion: &GraphAssertion) -> IdentityResult<VerifiedIdentity> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            assertion.subject_id
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("fields", "id,name,email"),
                ("access_token", assertion.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| IdentityError::ProviderVerificationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError::ProviderVerificationFailed(format!(
                "graph endpoint returned {}",
                response.status()
            )));
        }

        let profile: GraphProfile = response
            .json()
            .await
            .map_err(|e| IdentityError::ProviderVerificationFailed(e.to_string()))?;

        Ok(VerifiedIdentity {
            email: profile.email.unwrap_or_default(),
            display_name: profile.name.unwrap_or_default(),
        })
    }
}
