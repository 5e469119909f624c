//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, CacheAppState};
pub use middleware::{AuthMiddlewareState, csrf_guard, require_admin};
pub use router::{auth_router, auth_router_generic, cache_router, cache_router_generic};
