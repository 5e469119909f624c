//! Version Record Entity
//!
//! Immutable snapshot of a document's content at a point in time,
//! persisted as one JSON file per version. Field names are the file
//! format contract: snake_case, RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::version_id::VersionId;

/// Stored version record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Version id, equal to the file stem
    pub id: String,
    /// Full document content at this version
    pub content: String,
    /// Who created the version, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VersionRecord {
    /// Create a new record stamped now
    pub fn new(id: VersionId, content: String, author: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.as_str().to_string(),
            content,
            author,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_stamps_both_timestamps() {
        let record = VersionRecord::new(
            VersionId::generate(),
            "# Hello".to_string(),
            Some("admin".to_string()),
        );
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_wire_shape() {
        let record = VersionRecord::new(VersionId::generate(), "body".to_string(), None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("created_at").is_some());
        assert!(json.get("updated_at").is_some());
        // Absent author is omitted, not null
        assert!(json.get("author").is_none());
    }

    #[test]
    fn test_deserializes_without_author() {
        let raw = r##"{
            "id": "1714000000000-deadbeef",
            "content": "# Doc",
            "created_at": "2024-04-25T00:00:00Z",
            "updated_at": "2024-04-25T00:00:00Z"
        }"##;
        let record: VersionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.author, None);
    }
}
