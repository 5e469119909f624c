//! Version Id Value Object
//!
//! Version ids share the slug's path-segment validation: both become
//! filesystem path components and both are rejected up front if they
//! could escape the version directory.
//!
//! Generated ids embed a millisecond timestamp plus a random suffix,
//! so concurrent writers never collide on a fresh id.

use std::fmt;

use chrono::Utc;

use crate::domain::value_object::validate_path_segment;
use crate::error::{DocStoreError, DocStoreResult};

/// Validated version id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionId(String);

impl VersionId {
    /// Generate a fresh unique id: `<unix millis>-<8 hex chars>`
    pub fn generate() -> Self {
        Self(format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            platform::crypto::token_hex(4)
        ))
    }

    /// Parse a raw route segment into a version id
    pub fn parse(raw: &str) -> DocStoreResult<Self> {
        validate_path_segment(raw, "version id").map_err(DocStoreError::Validation)?;
        Ok(Self(raw.to_string()))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = VersionId::generate();
        let b = VersionId::generate();
        assert_ne!(a, b);
        assert!(VersionId::parse(a.as_str()).is_ok());
    }

    #[test]
    fn test_parse_rejects_path_escapes() {
        assert!(VersionId::parse("../../secret").is_err());
        assert!(VersionId::parse("v1.json").is_err());
        assert!(VersionId::parse("").is_err());
        assert!(VersionId::parse(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_parse_valid() {
        let id = VersionId::parse("1714000000000-deadbeef").unwrap();
        assert_eq!(id.as_str(), "1714000000000-deadbeef");
    }
}
