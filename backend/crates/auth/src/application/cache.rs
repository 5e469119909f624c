//! Cache Use Case
//!
//! Thin coordination over the generic cache repository: key validation,
//! default TTL, and the miss-vs-error distinction.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::repository::CacheRepository;
use crate::domain::value_object::cache_key::CacheKey;
use crate::error::{AuthError, AuthResult};

/// TTL applied when the client does not supply one
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Cache use case
pub struct CacheUseCase<C>
where
    C: CacheRepository,
{
    store: Arc<C>,
}

impl<C> CacheUseCase<C>
where
    C: CacheRepository,
{
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    /// Fetch a value; a miss is `KeyNotFound`
    pub async fn get(&self, key: &str) -> AuthResult<String> {
        let key = parse_key(key)?;
        self.store
            .get_value(&key)
            .await?
            .ok_or(AuthError::KeyNotFound)
    }

    /// Store a value with an optional TTL override in seconds
    pub async fn set(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> AuthResult<()> {
        let key = parse_key(key)?;
        let ttl = match ttl_secs {
            Some(0) => {
                return Err(AuthError::Validation(
                    "ttl must be greater than zero".to_string(),
                ));
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_CACHE_TTL,
        };
        self.store.set_value(&key, value, ttl).await
    }

    /// Delete a value, reporting whether it existed
    pub async fn delete(&self, key: &str) -> AuthResult<bool> {
        let key = parse_key(key)?;
        self.store.delete_value(&key).await
    }
}

fn parse_key(raw: &str) -> AuthResult<CacheKey> {
    CacheKey::parse(raw).map_err(|e| AuthError::Validation(e.message().to_string()))
}
