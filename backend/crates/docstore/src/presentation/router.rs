//! Docstore Router
//!
//! Paths are relative to the mount point; the composition root nests
//! this under `/api/admin/docs` behind the admin and CSRF guards.

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::VersionRepository;
use crate::infra::fs::FsVersionRepository;
use crate::presentation::handlers::{self, DocsAppState};

/// Create the docs router with the filesystem repository
pub fn docs_router(repo: FsVersionRepository) -> Router {
    docs_router_generic(repo)
}

/// Create a generic docs router for any repository implementation
pub fn docs_router_generic<R>(repo: R) -> Router
where
    R: VersionRepository + Clone + Send + Sync + 'static,
{
    let state = DocsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/{slug}/versions",
            get(handlers::list_versions::<R>).post(handlers::create_version::<R>),
        )
        .route(
            "/{slug}/versions/{version_id}",
            get(handlers::get_version::<R>),
        )
        .with_state(state)
}
