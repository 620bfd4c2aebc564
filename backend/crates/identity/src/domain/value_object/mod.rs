//! Value Object Module

pub mod account_id;
pub mod address;
pub mod cart_entry;
pub mod credential;
pub mod display_name;
pub mod email;
pub mod origin;
pub mod phone_number;
pub mod product_id;
