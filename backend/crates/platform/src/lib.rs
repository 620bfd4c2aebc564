//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Stateless access tokens (HMAC-SHA256 signed, self-expiring)

pub mod password;
pub mod token;
