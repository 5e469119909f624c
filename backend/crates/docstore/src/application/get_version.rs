//! Get Version Use Case

use std::sync::Arc;

use crate::domain::entity::version::VersionRecord;
use crate::domain::repository::VersionRepository;
use crate::domain::value_object::slug::Slug;
use crate::domain::value_object::version_id::VersionId;
use crate::error::{DocStoreError, DocStoreResult};

/// Get version use case
pub struct GetVersionUseCase<R>
where
    R: VersionRepository,
{
    repo: Arc<R>,
}

impl<R> GetVersionUseCase<R>
where
    R: VersionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Both segments are validated before any path is constructed
    pub async fn execute(&self, raw_slug: &str, raw_id: &str) -> DocStoreResult<VersionRecord> {
        let slug = Slug::parse(raw_slug)?;
        let id = VersionId::parse(raw_id)?;

        self.repo
            .get(&slug, &id)
            .await?
            .ok_or(DocStoreError::NotFound)
    }
}
