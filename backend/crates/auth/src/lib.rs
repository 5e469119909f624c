//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Store implementations (Redis, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Server-side sessions with opaque cookie tokens (64-hex handles)
//! - Credential verification against an immutable, env-sourced user set
//! - Double-submit CSRF tokens (cookie + mirrored request header)
//! - Ordered identity resolution (session cookie first, trusted
//!   identity headers as a lower-assurance fallback)
//! - Generic JSON cache on the same store as sessions
//!
//! ## Security Model
//! - Passwords verified with bcrypt; unknown email and wrong password
//!   are indistinguishable in the response
//! - Malformed session tokens never reach the store
//! - Store outages fail closed in production; development may degrade
//!   to a synthetic admin identity (explicit policy, logged)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, DegradedMode};
pub use application::user_directory::{ConfigUser, UserDirectory};
pub use domain::entity::identity::Identity;
pub use domain::value_object::user_role::Role;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryStore;
pub use infra::redis::RedisStore;
pub use presentation::middleware::{AuthMiddlewareState, csrf_guard, require_admin};
pub use presentation::router::{
    auth_router, auth_router_generic, cache_router, cache_router_generic,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
