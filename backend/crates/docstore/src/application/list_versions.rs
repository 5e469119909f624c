//! List Versions Use Case

use std::sync::Arc;

use crate::domain::entity::version::VersionRecord;
use crate::domain::repository::VersionRepository;
use crate::domain::value_object::slug::Slug;
use crate::error::DocStoreResult;

/// List versions use case
pub struct ListVersionsUseCase<R>
where
    R: VersionRepository,
{
    repo: Arc<R>,
}

impl<R> ListVersionsUseCase<R>
where
    R: VersionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All versions of a document, newest first; an unknown slug is an
    /// empty history, not a 404
    pub async fn execute(&self, raw_slug: &str) -> DocStoreResult<Vec<VersionRecord>> {
        let slug = Slug::parse(raw_slug)?;
        self.repo.list(&slug).await
    }
}
