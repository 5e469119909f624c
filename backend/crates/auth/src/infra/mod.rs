//! Infrastructure Layer
//!
//! Store implementations: Redis in production, in-memory everywhere a
//! Redis instance is not available.

pub mod memory;
pub mod redis;

pub use memory::InMemoryStore;
pub use redis::RedisStore;
