//! Redis Store
//!
//! Session and cache persistence on a shared multiplexed Redis
//! connection. Keys are namespaced: sessions under `session:<token>`,
//! generic cache entries under `cache:<key>`. Expiry is delegated to
//! Redis via SETEX so nothing needs a reaper task.

use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::{CacheRepository, SessionRepository};
use crate::domain::value_object::cache_key::CacheKey;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Redis-backed store implementing both repositories
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Connect and start the managed (auto-reconnecting) connection
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn session_key(token: &SessionToken) -> String {
        format!("session:{}", token.as_str())
    }

    fn cache_key(key: &CacheKey) -> String {
        format!("cache:{}", key.as_str())
    }
}

impl SessionRepository for RedisStore {
    async fn put_session(
        &self,
        token: &SessionToken,
        record: &SessionRecord,
        ttl: Duration,
    ) -> AuthResult<()> {
        let payload = serde_json::to_string(record)
            .map_err(|e| AuthError::Internal(format!("Failed to serialize session: {e}")))?;

        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::session_key(token), payload, ttl.as_secs())
            .await?;
        Ok(())
    }

    async fn get_session(&self, token: &SessionToken) -> AuthResult<Option<SessionRecord>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(Self::session_key(token)).await?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // A record we cannot read is a record we do not have
                tracing::warn!(error = %e, "Discarding unreadable session record");
                Ok(None)
            }
        }
    }

    async fn delete_session(&self, token: &SessionToken) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(Self::session_key(token)).await?;
        Ok(())
    }
}

impl CacheRepository for RedisStore {
    async fn get_value(&self, key: &CacheKey) -> AuthResult<Option<String>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(Self::cache_key(key)).await?;
        Ok(raw)
    }

    async fn set_value(&self, key: &CacheKey, value: &str, ttl: Duration) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::cache_key(key), value, ttl.as_secs())
            .await?;
        Ok(())
    }

    async fn delete_value(&self, key: &CacheKey) -> AuthResult<bool> {
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(Self::cache_key(key)).await?;
        Ok(deleted > 0)
    }
}
