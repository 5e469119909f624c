//! Docstore (Document Version Store) Backend Module
//!
//! Filesystem-backed version history for documents: one immutable JSON
//! file per version under `<root>/.versions/<slug>/<versionId>.json`.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - Filesystem repository (packaged + writable overlay)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Slug and version id are both validated as path segments (charset
//!   `[a-z0-9_-]`, length 1-100, no traversal sequences) before any
//!   filesystem path is constructed
//! - Versions are immutable once written; writes go to a distinguished
//!   writable directory so the packaged artifact stays read-only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{CreateVersionInput, CreateVersionUseCase, GetVersionUseCase, ListVersionsUseCase};
pub use domain::entity::version::VersionRecord;
pub use domain::value_object::slug::Slug;
pub use domain::value_object::version_id::VersionId;
pub use error::{DocStoreError, DocStoreResult};
pub use infra::fs::FsVersionRepository;
pub use presentation::router::{docs_router, docs_router_generic};
