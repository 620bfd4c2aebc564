//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod graph;
pub mod memory;
pub mod oidc;
pub mod postgres;
pub mod sms;

pub use graph::{GraphAssertion, GraphIdentityVerifier};
pub use memory::InMemoryAccountStore;
pub use oidc::{OidcAssertion, OidcIdentityVerifier};
pub use postgres::PgAccountStore;
pub use sms::SmsNotifier;
