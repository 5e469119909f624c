//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entity::identity::Identity;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: Identity,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

impl SessionStatusResponse {
    pub fn authenticated(user: Identity) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}

// ============================================================================
// CSRF
// ============================================================================

/// CSRF token issuance response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// CSRF validation response
#[derive(Debug, Clone, Serialize)]
pub struct CsrfValidateResponse {
    pub valid: bool,
}

// ============================================================================
// Cache
// ============================================================================

/// Query parameters for cache get/delete
#[derive(Debug, Clone, Deserialize)]
pub struct CacheKeyQuery {
    pub key: String,
}

/// Cache set request
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSetRequest {
    pub key: String,
    pub value: Value,
    /// TTL override in seconds; defaults to one hour
    pub ttl: Option<u64>,
}

/// Cache value response
#[derive(Debug, Clone, Serialize)]
pub struct CacheValueResponse {
    pub success: bool,
    pub value: Value,
}

// ============================================================================
// Generic
// ============================================================================

/// Bare success acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub success: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
