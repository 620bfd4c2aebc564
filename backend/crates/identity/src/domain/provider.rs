//! Identity Provider Traits
//!
//! Seam for third-party identity verification. Each provider takes its own
//! assertion shape and either returns the profile fields it could verify or
//! fails; deciding whether those fields are usable is the engine's job.

use crate::domain::value_object::origin::AccountOrigin;
use crate::error::IdentityResult;

/// Profile fields attested by an identity provider
///
/// Fields the provider omitted come back empty; the resolution engine
/// rejects unusable identities with a validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub display_name: String,
}

/// Identity verifier trait
#[trait_variant::make(IdentityVerifier: Send)]
pub trait LocalIdentityVerifier {
    /// Provider-specific assertion shape (tokens, subject ids, ...)
    type Assertion: Send + Sync;

    /// The origin stamped onto accounts this verifier creates
    fn origin(&self) -> AccountOrigin;

    /// Verify an assertion against the provider
    async fn verify(&self, assertion: &Self::Assertion) -> IdentityResult<VerifiedIdentity>;
}
