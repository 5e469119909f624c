//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::DocsAppState;
pub use router::{docs_router, docs_router_generic};
