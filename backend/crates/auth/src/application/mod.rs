//! Application Layer
//!
//! Use cases and application services.

pub mod cache;
pub mod check_session;
pub mod config;
pub mod csrf;
pub mod resolve_identity;
pub mod sign_in;
pub mod sign_out;
pub mod user_directory;

// Re-exports
pub use cache::{CacheUseCase, DEFAULT_CACHE_TTL};
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, DegradedMode};
pub use csrf::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME, mint_csrf_token, requires_csrf, validate_csrf};
pub use resolve_identity::{
    IdentityResolver, ResolveIdentityUseCase, SessionTokenResolver, TrustedHeaderResolver,
};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use user_directory::{ConfigUser, UserDirectory};
