//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the bearer-token gate.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::IdentityAppState;
pub use middleware::{CurrentAccount, require_account};
pub use router::{identity_router, identity_router_generic};
