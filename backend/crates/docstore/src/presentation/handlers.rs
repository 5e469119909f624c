//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{
    CreateVersionInput, CreateVersionUseCase, GetVersionUseCase, ListVersionsUseCase,
};
use crate::domain::repository::VersionRepository;
use crate::error::DocStoreResult;
use crate::presentation::dto::{CreateVersionRequest, VersionListResponse, VersionResponse};

/// Shared state for docstore handlers
#[derive(Clone)]
pub struct DocsAppState<R>
where
    R: VersionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/admin/docs/{slug}/versions
pub async fn list_versions<R>(
    State(state): State<DocsAppState<R>>,
    Path(slug): Path<String>,
) -> DocStoreResult<Json<VersionListResponse>>
where
    R: VersionRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListVersionsUseCase::new(state.repo.clone());
    let versions = use_case.execute(&slug).await?;

    Ok(Json(VersionListResponse {
        success: true,
        versions,
    }))
}

/// GET /api/admin/docs/{slug}/versions/{version_id}
pub async fn get_version<R>(
    State(state): State<DocsAppState<R>>,
    Path((slug, version_id)): Path<(String, String)>,
) -> DocStoreResult<Json<VersionResponse>>
where
    R: VersionRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetVersionUseCase::new(state.repo.clone());
    let version = use_case.execute(&slug, &version_id).await?;

    Ok(Json(VersionResponse {
        success: true,
        version,
    }))
}

/// POST /api/admin/docs/{slug}/versions
pub async fn create_version<R>(
    State(state): State<DocsAppState<R>>,
    Path(slug): Path<String>,
    Json(req): Json<CreateVersionRequest>,
) -> DocStoreResult<(StatusCode, Json<VersionResponse>)>
where
    R: VersionRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateVersionUseCase::new(state.repo.clone());
    let version = use_case
        .execute(
            &slug,
            CreateVersionInput {
                content: req.content,
                author: req.author,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VersionResponse {
            success: true,
            version,
        }),
    ))
}
