//! Filesystem Version Repository
//!
//! Versions live at `<root>/.versions/<slug>/<versionId>.json`. Two
//! roots are consulted: the packaged (deployment artifact, possibly
//! read-only) directory and a writable overlay. Reads merge both with
//! the overlay winning per id; writes only ever touch the overlay.
//!
//! Every `*.json` file must parse completely or the whole operation
//! fails; a half-readable version history is worse than an error.

use std::collections::HashMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::domain::entity::version::VersionRecord;
use crate::domain::repository::VersionRepository;
use crate::domain::value_object::slug::Slug;
use crate::domain::value_object::version_id::VersionId;
use crate::error::{DocStoreError, DocStoreResult};

/// Subdirectory holding version history, alongside the documents
pub const VERSIONS_SUBDIR: &str = ".versions";

/// Filesystem-backed version repository
#[derive(Debug, Clone)]
pub struct FsVersionRepository {
    packaged_root: PathBuf,
    writable_root: PathBuf,
}

impl FsVersionRepository {
    pub fn new(packaged_root: impl Into<PathBuf>, writable_root: impl Into<PathBuf>) -> Self {
        Self {
            packaged_root: packaged_root.into(),
            writable_root: writable_root.into(),
        }
    }

    fn slug_dir(root: &Path, slug: &Slug) -> PathBuf {
        root.join(VERSIONS_SUBDIR).join(slug.as_str())
    }

    fn version_path(root: &Path, slug: &Slug, id: &VersionId) -> PathBuf {
        Self::slug_dir(root, slug).join(format!("{}.json", id.as_str()))
    }

    /// Read one version file; a missing file is `None`
    async fn read_record(path: &Path) -> DocStoreResult<Option<VersionRecord>> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = serde_json::from_slice(&raw)
            .map_err(|e| DocStoreError::Corrupt(format!("{}: {e}", path.display())))?;
        Ok(Some(record))
    }

    /// Read every `*.json` in a slug directory; a missing directory is
    /// an empty map
    async fn read_dir_records(dir: &Path) -> DocStoreResult<HashMap<String, VersionRecord>> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = HashMap::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(record) = Self::read_record(&path).await? {
                records.insert(record.id.clone(), record);
            }
        }
        Ok(records)
    }
}

impl VersionRepository for FsVersionRepository {
    async fn list(&self, slug: &Slug) -> DocStoreResult<Vec<VersionRecord>> {
        let mut records = Self::read_dir_records(&Self::slug_dir(&self.packaged_root, slug)).await?;

        if self.writable_root != self.packaged_root {
            // Overlay wins per id
            records.extend(Self::read_dir_records(&Self::slug_dir(&self.writable_root, slug)).await?);
        }

        let mut records: Vec<VersionRecord> = records.into_values().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn get(&self, slug: &Slug, id: &VersionId) -> DocStoreResult<Option<VersionRecord>> {
        if let Some(record) =
            Self::read_record(&Self::version_path(&self.writable_root, slug, id)).await?
        {
            return Ok(Some(record));
        }

        if self.writable_root == self.packaged_root {
            return Ok(None);
        }

        Self::read_record(&Self::version_path(&self.packaged_root, slug, id)).await
    }

    async fn put(&self, slug: &Slug, record: &VersionRecord) -> DocStoreResult<()> {
        let dir = Self::slug_dir(&self.writable_root, slug);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{}.json", record.id));

        // create_new keeps versions immutable: an existing file is a
        // conflict, never an overwrite
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == IoErrorKind::AlreadyExists => {
                return Err(DocStoreError::AlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        let payload = serde_json::to_vec_pretty(record)
            .map_err(|e| DocStoreError::Corrupt(format!("serialize {}: {e}", record.id)))?;
        file.write_all(&payload).await?;
        file.flush().await?;

        tracing::debug!(slug = %slug, version_id = %record.id, "Version written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn slug() -> Slug {
        Slug::parse("guide").unwrap()
    }

    fn record(id: &str, offset_secs: i64) -> VersionRecord {
        let at = Utc::now() + Duration::seconds(offset_secs);
        VersionRecord {
            id: id.to_string(),
            content: format!("content of {id}"),
            author: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn single_root_repo(dir: &TempDir) -> FsVersionRepository {
        FsVersionRepository::new(dir.path(), dir.path())
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let repo = single_root_repo(&dir);
        let version = record("v1", 0);

        repo.put(&slug(), &version).await.unwrap();

        let id = VersionId::parse("v1").unwrap();
        let found = repo.get(&slug(), &id).await.unwrap().unwrap();
        assert_eq!(found, version);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let repo = single_root_repo(&dir);

        let id = VersionId::parse("absent").unwrap();
        assert!(repo.get(&slug(), &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = single_root_repo(&dir);

        let versions = repo.list(&slug()).await.unwrap();
        assert!(versions.is_empty());
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first() {
        let dir = TempDir::new().unwrap();
        let repo = single_root_repo(&dir);

        repo.put(&slug(), &record("older", -60)).await.unwrap();
        repo.put(&slug(), &record("newer", 0)).await.unwrap();
        repo.put(&slug(), &record("oldest", -120)).await.unwrap();

        let versions = repo.list(&slug()).await.unwrap();
        let ids: Vec<&str> = versions.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["newer", "older", "oldest"]);
    }

    #[tokio::test]
    async fn test_put_existing_id_is_conflict() {
        let dir = TempDir::new().unwrap();
        let repo = single_root_repo(&dir);

        repo.put(&slug(), &record("v1", 0)).await.unwrap();
        let result = repo.put(&slug(), &record("v1", 10)).await;
        assert!(matches!(result, Err(DocStoreError::AlreadyExists)));

        // The original survives untouched
        let id = VersionId::parse("v1").unwrap();
        let found = repo.get(&slug(), &id).await.unwrap().unwrap();
        assert_eq!(found.content, "content of v1");
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_whole_list() {
        let dir = TempDir::new().unwrap();
        let repo = single_root_repo(&dir);
        repo.put(&slug(), &record("good", 0)).await.unwrap();

        let bad = dir
            .path()
            .join(VERSIONS_SUBDIR)
            .join("guide")
            .join("bad.json");
        std::fs::write(&bad, b"{ not json").unwrap();

        assert!(matches!(
            repo.list(&slug()).await,
            Err(DocStoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_non_json_files_ignored_in_list() {
        let dir = TempDir::new().unwrap();
        let repo = single_root_repo(&dir);
        repo.put(&slug(), &record("v1", 0)).await.unwrap();

        let stray = dir
            .path()
            .join(VERSIONS_SUBDIR)
            .join("guide")
            .join("README.md");
        std::fs::write(&stray, b"not a version").unwrap();

        let versions = repo.list(&slug()).await.unwrap();
        assert_eq!(versions.len(), 1);
    }

    #[tokio::test]
    async fn test_writable_overlay_shadows_packaged() {
        let packaged = TempDir::new().unwrap();
        let writable = TempDir::new().unwrap();

        // Seed the packaged root via a throwaway repo pointed at it
        let seeder = FsVersionRepository::new(packaged.path(), packaged.path());
        seeder.put(&slug(), &record("shared", -60)).await.unwrap();
        seeder
            .put(&slug(), &record("packaged-only", -120))
            .await
            .unwrap();

        let repo = FsVersionRepository::new(packaged.path(), writable.path());

        // Overlay carries a different body under the same id
        let mut shadowing = record("shared", 0);
        shadowing.content = "overlay content".to_string();
        repo.put(&slug(), &shadowing).await.unwrap();
        repo.put(&slug(), &record("writable-only", 30)).await.unwrap();

        let versions = repo.list(&slug()).await.unwrap();
        assert_eq!(versions.len(), 3);

        let shared = versions.iter().find(|v| v.id == "shared").unwrap();
        assert_eq!(shared.content, "overlay content");

        // get consults the overlay first, then falls back
        let id = VersionId::parse("packaged-only").unwrap();
        assert!(repo.get(&slug(), &id).await.unwrap().is_some());
        let id = VersionId::parse("shared").unwrap();
        assert_eq!(
            repo.get(&slug(), &id).await.unwrap().unwrap().content,
            "overlay content"
        );
    }

    #[tokio::test]
    async fn test_writes_only_touch_writable_root() {
        let packaged = TempDir::new().unwrap();
        let writable = TempDir::new().unwrap();
        let repo = FsVersionRepository::new(packaged.path(), writable.path());

        repo.put(&slug(), &record("v1", 0)).await.unwrap();

        assert!(!packaged.path().join(VERSIONS_SUBDIR).exists());
        assert!(
            writable
                .path()
                .join(VERSIONS_SUBDIR)
                .join("guide")
                .join("v1.json")
                .exists()
        );
    }
}
