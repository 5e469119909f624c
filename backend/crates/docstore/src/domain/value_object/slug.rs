//! Slug Value Object
//!
//! Restricted-character document identifier. Validation happens here,
//! before a slug can ever reach a filesystem path.

use std::fmt;

use crate::domain::value_object::validate_path_segment;
use crate::error::{DocStoreError, DocStoreResult};

/// Validated document slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Parse a raw route segment into a slug
    pub fn parse(raw: &str) -> DocStoreResult<Self> {
        validate_path_segment(raw, "slug").map_err(DocStoreError::Validation)?;
        Ok(Self(raw.to_string()))
    }

    /// Get the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
