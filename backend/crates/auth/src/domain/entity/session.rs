//! Session Record Entity
//!
//! Represents an authenticated session as stored in the session store
//! under `session:<token>`. The token itself is the store key and never
//! appears inside the record.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::Identity;

/// Stored session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The authenticated user
    pub user: Identity,
    /// Session expiration (Unix timestamp ms), wire name `expires`
    #[serde(rename = "expires")]
    pub expires_at_ms: i64,
}

impl SessionRecord {
    /// Create a new session record expiring `ttl` from now
    pub fn new(user: Identity, ttl: Duration) -> Self {
        let expires_at_ms = Utc::now().timestamp_millis() + ttl.as_millis() as i64;
        Self {
            user,
            expires_at_ms,
        }
    }

    /// Check if the record has expired.
    ///
    /// The store enforces a TTL of its own; this is the authoritative
    /// check for entries that outlive it (or stores without expiry).
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_not_expired() {
        let record = SessionRecord::new(
            Identity::synthetic_admin(),
            Duration::from_secs(24 * 3600),
        );
        assert!(!record.is_expired());
        assert!(record.expires_at_ms > Utc::now().timestamp_millis());
    }

    #[test]
    fn test_stale_record_expired() {
        let mut record = SessionRecord::new(Identity::synthetic_admin(), Duration::from_secs(60));
        record.expires_at_ms = Utc::now().timestamp_millis() - 1_000;
        assert!(record.is_expired());
    }

    #[test]
    fn test_wire_field_name() {
        let record = SessionRecord::new(Identity::synthetic_admin(), Duration::from_secs(60));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("expires").is_some());
        assert!(json.get("expires_at_ms").is_none());
    }
}
