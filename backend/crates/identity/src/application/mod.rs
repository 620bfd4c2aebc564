//! Application Layer
//!
//! Use cases and application services.

pub mod address_book;
pub mod cart;
pub mod config;
pub mod login;
mod mutation;
pub mod profile;
pub mod provider_login;
pub mod register;
pub mod view;
pub mod wishlist;

// Re-exports
pub use address_book::{AddressBookUseCase, AddressInput};
pub use cart::{CartItemInput, ReplaceCartUseCase};
pub use config::IdentityConfig;
pub use login::{LoginInput, LoginUseCase};
pub use profile::{UpdateProfileInput, UpdateProfileUseCase};
pub use provider_login::ProviderLoginUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use view::{AccountView, AddressView, CartItemView};
pub use wishlist::{ToggleWishlistOutput, ToggleWishlistUseCase};
