//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// Display strings double as the client-facing `{"error": ...}` message,
/// so credential failures stay deliberately generic.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown email (indistinguishable on purpose)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Account exists but has no stored password hash
    #[error("This account uses OAuth sign-in")]
    OAuthOnly,

    /// Session token malformed, unknown, or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// No identity could be resolved for a protected route
    #[error("Authentication required")]
    NotAuthenticated,

    /// Resolved identity lacks the admin role
    #[error("Admin access required")]
    AdminRequired,

    /// CSRF header and cookie missing or disagreeing
    #[error("Invalid CSRF token")]
    CsrfMismatch,

    /// Request validation error
    #[error("{0}")]
    Validation(String),

    /// Cache lookup miss
    #[error("Key not found")]
    KeyNotFound,

    /// Store (Redis) error
    #[error("Cache service unavailable")]
    Store(#[from] redis::RedisError),

    /// Internal error
    #[error("Internal server error")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::OAuthOnly
            | AuthError::SessionInvalid
            | AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::AdminRequired | AuthError::CsrfMismatch => StatusCode::FORBIDDEN,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::KeyNotFound => StatusCode::NOT_FOUND,
            AuthError::Store(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::OAuthOnly
            | AuthError::SessionInvalid
            | AuthError::NotAuthenticated => ErrorKind::Unauthorized,
            AuthError::AdminRequired | AuthError::CsrfMismatch => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::KeyNotFound => ErrorKind::NotFound,
            AuthError::Store(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, "Session store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::CsrfMismatch => {
                tracing::warn!("CSRF token validation failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
