//! Outbound Notification Trait
//!
//! Fire-and-forget at every call site: a failed send is logged and never
//! surfaces to the caller.

use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::IdentityResult;

/// Notification sender trait
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    /// Send a text message to a phone number
    async fn send(&self, message: &str, number: &PhoneNumber) -> IdentityResult<()>;
}
