//! Relay Error Types
//!
//! Every relay failure is a generic 500 on the wire per the proxy
//! contract; the variants exist for logging and for deployments that
//! opt in to exposing detail.

use axum::http::StatusCode;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Relay-specific result type alias
pub type RelayResult<T> = Result<T, RelayError>;

/// Relay-specific error variants
#[derive(Debug, Error)]
pub enum RelayError {
    /// Upstream transport or protocol failure
    #[error("Upstream request failed")]
    Upstream(#[from] reqwest::Error),

    /// Inbound method the relay does not forward
    #[error("Upstream request failed")]
    Method(String),

    /// Inbound body could not be read
    #[error("Upstream request failed")]
    Body(String),

    /// Response assembly failure
    #[error("Upstream request failed")]
    Internal(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InternalServerError
    }

    /// Server-side detail; never sent to clients unless the deployment
    /// exposes upstream errors
    pub fn detail(&self) -> String {
        match self {
            RelayError::Upstream(e) => e.to_string(),
            RelayError::Method(m) => format!("method {m} not forwarded"),
            RelayError::Body(msg) | RelayError::Internal(msg) => msg.clone(),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            RelayError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream request failed");
            }
            RelayError::Method(m) => {
                tracing::warn!(method = %m, "Refused to forward method");
            }
            RelayError::Body(msg) | RelayError::Internal(msg) => {
                tracing::error!(message = %msg, "Relay error");
            }
        }
    }
}
