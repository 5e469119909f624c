//! Repository Traits
//!
//! Interfaces for session and cache persistence. Implementations are in
//! the infrastructure layer (Redis in production, in-memory for tests
//! and Redis-less development).

use std::time::Duration;

use crate::domain::entity::session::SessionRecord;
use crate::domain::value_object::cache_key::CacheKey;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a session record under a token, expiring after `ttl`
    async fn put_session(
        &self,
        token: &SessionToken,
        record: &SessionRecord,
        ttl: Duration,
    ) -> AuthResult<()>;

    /// Look up a session by token
    async fn get_session(&self, token: &SessionToken) -> AuthResult<Option<SessionRecord>>;

    /// Delete a session
    async fn delete_session(&self, token: &SessionToken) -> AuthResult<()>;
}

/// Generic cache repository trait
#[trait_variant::make(CacheRepository: Send)]
pub trait LocalCacheRepository {
    /// Fetch a cached value
    async fn get_value(&self, key: &CacheKey) -> AuthResult<Option<String>>;

    /// Store a value, expiring after `ttl`
    async fn set_value(&self, key: &CacheKey, value: &str, ttl: Duration) -> AuthResult<()>;

    /// Delete a value, returning whether it existed
    async fn delete_value(&self, key: &CacheKey) -> AuthResult<bool>;
}
