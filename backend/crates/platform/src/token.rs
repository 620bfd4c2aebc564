//! Stateless Access Tokens
//!
//! Compact bearer tokens of the form `subject.expiry.nonce.signature`:
//! - `subject` - the identifier the token was issued for
//! - `expiry` - Unix timestamp in milliseconds
//! - `nonce` - 8 random bytes, base64url; makes every issued token unique
//! - `signature` - HMAC-SHA256 over the first three parts, base64url
//!
//! Validity is purely a function of the signature and the embedded expiry;
//! no server-side session state is required to verify a token.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;

/// Length of the random nonce embedded in each token
const NONCE_LENGTH: usize = 8;

/// Token verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token does not have the expected structure
    #[error("Malformed token")]
    Malformed,

    /// HMAC signature does not verify
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token expiry is in the past
    #[error("Token expired")]
    Expired,
}

/// Issues and verifies HMAC-signed access tokens
///
/// Subjects must not contain `.` (the field separator).
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: [u8; 32],
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: [u8; 32], ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue a fresh token for `subject`
    ///
    /// Two tokens issued for the same subject are always distinct
    /// (random nonce), even within the same millisecond.
    pub fn issue(&self, subject: &str) -> String {
        let expires_at_ms = Utc::now().timestamp_millis() + self.ttl.as_millis() as i64;
        self.issue_at(subject, expires_at_ms)
    }

    fn issue_at(&self, subject: &str, expires_at_ms: i64) -> String {
        let mut nonce = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce);

        let payload = format!(
            "{}.{}.{}",
            subject,
            expires_at_ms,
            URL_SAFE_NO_PAD.encode(nonce)
        );

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
    }

    /// Verify a token and return its subject
    ///
    /// The signature is checked before the expiry so that a forged token
    /// never influences behavior, and MAC comparison is constant-time.
    pub fn resolve(&self, token: &str) -> Result<String, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 4 {
            return Err(TokenError::Malformed);
        }

        let (subject, expiry, nonce, signature_b64) = (parts[0], parts[1], parts[2], parts[3]);

        let payload = format!("{}.{}.{}", subject, expiry, nonce);

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let expires_at_ms: i64 = expiry.parse().map_err(|_| TokenError::Malformed)?;

        if Utc::now().timestamp_millis() > expires_at_ms {
            return Err(TokenError::Expired);
        }

        Ok(subject.to_string())
    }
}
