//! Session Token Value Object
//!
//! Opaque session handle: 32 random bytes, lowercase-hex encoded.
//! Anything that is not exactly 64 lowercase hex characters is rejected
//! here, before any store access.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Session tokens are 32 bytes of entropy, hex-encoded
pub const SESSION_TOKEN_LEN: usize = 64;

/// Validated session token
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token
    pub fn generate() -> Self {
        Self(platform::crypto::token_hex(SESSION_TOKEN_LEN / 2))
    }

    /// Parse a raw cookie value into a token
    pub fn parse(raw: &str) -> AppResult<Self> {
        if !Self::is_valid_format(raw) {
            return Err(AppError::unauthorized("Malformed session token"));
        }
        Ok(Self(raw.to_string()))
    }

    /// Exactly 64 lowercase hex characters
    fn is_valid_format(raw: &str) -> bool {
        raw.len() == SESSION_TOKEN_LEN
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Get the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are bearer secrets; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
