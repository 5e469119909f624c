//! Create Version Use Case
//!
//! Mints a fresh version id and persists an immutable snapshot. The
//! generated id is unique per write, so concurrent creators never race
//! on a filename.

use std::sync::Arc;

use crate::domain::entity::version::VersionRecord;
use crate::domain::repository::VersionRepository;
use crate::domain::value_object::slug::Slug;
use crate::domain::value_object::version_id::VersionId;
use crate::error::{DocStoreError, DocStoreResult};

/// Create version input
pub struct CreateVersionInput {
    pub content: String,
    pub author: Option<String>,
}

/// Create version use case
pub struct CreateVersionUseCase<R>
where
    R: VersionRepository,
{
    repo: Arc<R>,
}

impl<R> CreateVersionUseCase<R>
where
    R: VersionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        raw_slug: &str,
        input: CreateVersionInput,
    ) -> DocStoreResult<VersionRecord> {
        let slug = Slug::parse(raw_slug)?;

        if input.content.is_empty() {
            return Err(DocStoreError::Validation("content is required".to_string()));
        }

        let record = VersionRecord::new(VersionId::generate(), input.content, input.author);
        self.repo.put(&slug, &record).await?;

        tracing::info!(slug = %slug, version_id = %record.id, "Version created");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::list_versions::ListVersionsUseCase;
    use crate::infra::fs::FsVersionRepository;
    use tempfile::TempDir;

    fn use_case(dir: &TempDir) -> CreateVersionUseCase<FsVersionRepository> {
        CreateVersionUseCase::new(Arc::new(FsVersionRepository::new(dir.path(), dir.path())))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let dir = TempDir::new().unwrap();
        let create = use_case(&dir);

        let record = create
            .execute(
                "guide",
                CreateVersionInput {
                    content: "# Guide".to_string(),
                    author: Some("admin".to_string()),
                },
            )
            .await
            .unwrap();

        let repo = Arc::new(FsVersionRepository::new(dir.path(), dir.path()));
        let listed = ListVersionsUseCase::new(repo).execute("guide").await.unwrap();
        assert_eq!(listed, vec![record]);
    }

    #[tokio::test]
    async fn test_empty_content_rejected() {
        let dir = TempDir::new().unwrap();
        let result = use_case(&dir)
            .execute(
                "guide",
                CreateVersionInput {
                    content: String::new(),
                    author: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DocStoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_slug_rejected() {
        let dir = TempDir::new().unwrap();
        let result = use_case(&dir)
            .execute(
                "Bad Slug",
                CreateVersionInput {
                    content: "x".to_string(),
                    author: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DocStoreError::Validation(_))));
    }
}
