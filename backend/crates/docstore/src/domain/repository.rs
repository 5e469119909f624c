//! Repository Trait
//!
//! Interface for version persistence. The filesystem implementation
//! lives in the infrastructure layer; callers never see paths, only
//! validated slugs and ids, so the store could be swapped for a real
//! datastore without touching use cases.

use crate::domain::entity::version::VersionRecord;
use crate::domain::value_object::slug::Slug;
use crate::domain::value_object::version_id::VersionId;
use crate::error::DocStoreResult;

/// Version repository trait
#[trait_variant::make(VersionRepository: Send)]
pub trait LocalVersionRepository {
    /// All versions of a document, newest first. A document with no
    /// versions yields an empty list, not an error.
    async fn list(&self, slug: &Slug) -> DocStoreResult<Vec<VersionRecord>>;

    /// Look up one version
    async fn get(&self, slug: &Slug, id: &VersionId) -> DocStoreResult<Option<VersionRecord>>;

    /// Persist a new version. Ids are never overwritten; an existing
    /// id is a conflict.
    async fn put(&self, slug: &Slug, record: &VersionRecord) -> DocStoreResult<()>;
}
