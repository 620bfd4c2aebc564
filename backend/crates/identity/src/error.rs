//! Identity Error Types
//!
//! This module provides identity-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Email already has an account
    #[error("This email is already registered")]
    AlreadyRegistered,

    /// Account not found
    #[error("Account not found")]
    AccountNotFound,

    /// Invalid credentials (wrong or absent password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Third-party identity assertion was rejected
    #[error("Provider verification failed: {0}")]
    ProviderVerificationFailed(String),

    /// Client referenced an address position that does not exist
    #[error("Address index {index} is out of range (length {len})")]
    AddressIndexOutOfRange { index: usize, len: usize },

    /// Missing, invalid, or expired bearer token
    #[error("Authentication required")]
    Unauthenticated,

    /// Concurrent modification retries exhausted
    #[error("Account was modified concurrently")]
    UpdateConflict,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::Validation(_) => StatusCode::BAD_REQUEST,
            IdentityError::AlreadyRegistered | IdentityError::UpdateConflict => {
                StatusCode::CONFLICT
            }
            IdentityError::AccountNotFound | IdentityError::AddressIndexOutOfRange { .. } => {
                StatusCode::NOT_FOUND
            }
            IdentityError::InvalidCredentials
            | IdentityError::ProviderVerificationFailed(_)
            | IdentityError::Unauthenticated => StatusCode::UNAUTHORIZED,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Validation(_) => ErrorKind::BadRequest,
            IdentityError::AlreadyRegistered | IdentityError::UpdateConflict => ErrorKind::Conflict,
            IdentityError::AccountNotFound | IdentityError::AddressIndexOutOfRange { .. } => {
                ErrorKind::NotFound
            }
            IdentityError::InvalidCredentials
            | IdentityError::ProviderVerificationFailed(_)
            | IdentityError::Unauthenticated => ErrorKind::Unauthorized,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError with a client-safe message
    ///
    /// Store and provider internals never reach the response body; domain
    /// outcomes keep their stable messages.
    pub fn into_app_error(self) -> AppError {
        match self {
            // Kernel knows how to classify database faults (pool exhaustion,
            // constraint class, connection loss)
            IdentityError::Database(e) => AppError::from(e),
            IdentityError::ProviderVerificationFailed(_) => {
                AppError::unauthorized("Provider verification failed")
            }
            IdentityError::Internal(_) => AppError::internal("Internal error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::ProviderVerificationFailed(detail) => {
                tracing::warn!(detail = %detail, "Provider assertion rejected");
            }
            IdentityError::Unauthenticated => {
                tracing::debug!("Request without valid bearer token");
            }
            IdentityError::UpdateConflict => {
                tracing::warn!("Account update retries exhausted");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        IdentityError::Internal(err.to_string())
    }
}
