//! Docstore Error Types
//!
//! Docstore-specific error variants integrating with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Docstore-specific result type alias
pub type DocStoreResult<T> = Result<T, DocStoreError>;

/// Docstore-specific error variants
///
/// Display strings double as the client-facing `{"error": ...}`
/// message; storage details stay in the server-side log.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// Malformed slug, version id, or request body
    #[error("{0}")]
    Validation(String),

    /// Requested version does not exist
    #[error("Version not found")]
    NotFound,

    /// A version with this id already exists (versions are immutable)
    #[error("Version already exists")]
    AlreadyExists,

    /// Filesystem failure
    #[error("Document storage error")]
    Io(#[from] std::io::Error),

    /// A stored version file did not parse; the operation fails whole
    #[error("Document storage error")]
    Corrupt(String),
}

impl DocStoreError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DocStoreError::Validation(_) => StatusCode::BAD_REQUEST,
            DocStoreError::NotFound => StatusCode::NOT_FOUND,
            DocStoreError::AlreadyExists => StatusCode::CONFLICT,
            DocStoreError::Io(_) | DocStoreError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocStoreError::Validation(_) => ErrorKind::BadRequest,
            DocStoreError::NotFound => ErrorKind::NotFound,
            DocStoreError::AlreadyExists => ErrorKind::Conflict,
            DocStoreError::Io(_) | DocStoreError::Corrupt(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DocStoreError::Io(e) => {
                tracing::error!(error = %e, "Version store I/O error");
            }
            DocStoreError::Corrupt(detail) => {
                tracing::error!(detail = %detail, "Unparseable version file");
            }
            _ => {
                tracing::debug!(error = %self, "Docstore error");
            }
        }
    }
}

impl IntoResponse for DocStoreError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
