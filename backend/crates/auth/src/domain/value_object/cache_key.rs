//! Cache Key Value Object

use kernel::error::app_error::{AppError, AppResult};

/// Upper bound keeps keys well under Redis limits and log-friendly
const MAX_CACHE_KEY_LEN: usize = 512;

/// Validated cache key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    /// Parse and validate a raw key
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("Cache key must not be empty"));
        }
        if trimmed.len() > MAX_CACHE_KEY_LEN {
            return Err(AppError::bad_request("Cache key too long"));
        }
        if trimmed.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(AppError::bad_request(
                "Cache key must not contain whitespace or control characters",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert!(CacheKey::parse("user:42:profile").is_ok());
        assert!(CacheKey::parse("a").is_ok());
        assert!(CacheKey::parse(&"k".repeat(512)).is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(CacheKey::parse("").is_err());
        assert!(CacheKey::parse("   ").is_err());
        assert!(CacheKey::parse("has space").is_err());
        assert!(CacheKey::parse("has\ttab").is_err());
        assert!(CacheKey::parse("has\nnewline").is_err());
    }

    #[test]
    fn test_rejects_too_long() {
        assert!(CacheKey::parse(&"k".repeat(513)).is_err());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let key = CacheKey::parse("  padded  ").unwrap();
        assert_eq!(key.as_str(), "padded");
    }
}
