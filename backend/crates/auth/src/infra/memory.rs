//! In-Memory Store
//!
//! Development and test stand-in for Redis. Uses the same key
//! namespacing as [`RedisStore`](super::redis::RedisStore) so behavior
//! matches apart from persistence.
//!
//! Expiry is checked lazily on access against `tokio::time::Instant`,
//! so tests running under a paused runtime clock can advance time
//! deterministically.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::{CacheRepository, SessionRepository};
use crate::domain::value_object::cache_key::CacheKey;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

struct Entry {
    payload: String,
    expires_at: Instant,
}

/// In-memory store implementing both repositories.
///
/// Entries are lost when the process restarts.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored (expired ones included until reaped)
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn put_raw(&self, key: String, payload: String, ttl: Duration) -> AuthResult<()> {
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;
        entries.insert(
            key,
            Entry {
                payload,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    fn get_raw(&self, key: &str) -> AuthResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;

        let live = entries
            .get(key)
            .map(|entry| (entry.expires_at > now).then(|| entry.payload.clone()));

        match live {
            None => Ok(None),
            Some(Some(payload)) => Ok(Some(payload)),
            Some(None) => {
                // Expired; reap while we hold the write lock
                entries.remove(key);
                Ok(None)
            }
        }
    }

    fn delete_raw(&self, key: &str) -> AuthResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;

        match entries.remove(key) {
            Some(entry) => Ok(entry.expires_at > now),
            None => Ok(false),
        }
    }
}

fn lock_poisoned() -> AuthError {
    AuthError::Internal("Store lock poisoned".to_string())
}

impl SessionRepository for InMemoryStore {
    async fn put_session(
        &self,
        token: &SessionToken,
        record: &SessionRecord,
        ttl: Duration,
    ) -> AuthResult<()> {
        let payload = serde_json::to_string(record)
            .map_err(|e| AuthError::Internal(format!("Failed to serialize session: {e}")))?;
        self.put_raw(format!("session:{}", token.as_str()), payload, ttl)
    }

    async fn get_session(&self, token: &SessionToken) -> AuthResult<Option<SessionRecord>> {
        let Some(raw) = self.get_raw(&format!("session:{}", token.as_str()))? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AuthError::Internal(format!("Failed to deserialize session: {e}")))
    }

    async fn delete_session(&self, token: &SessionToken) -> AuthResult<()> {
        self.delete_raw(&format!("session:{}", token.as_str()))?;
        Ok(())
    }
}

impl CacheRepository for InMemoryStore {
    async fn get_value(&self, key: &CacheKey) -> AuthResult<Option<String>> {
        self.get_raw(&format!("cache:{}", key.as_str()))
    }

    async fn set_value(&self, key: &CacheKey, value: &str, ttl: Duration) -> AuthResult<()> {
        self.put_raw(format!("cache:{}", key.as_str()), value.to_string(), ttl)
    }

    async fn delete_value(&self, key: &CacheKey) -> AuthResult<bool> {
        self.delete_raw(&format!("cache:{}", key.as_str()))
    }
}
