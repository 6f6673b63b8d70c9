//! Per-course metadata persistence: one `meta.json` at each course
//! directory root.

use courseshelf_core::{AppError, CourseMeta};
use std::io;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

pub const META_FILENAME: &str = "meta.json";

#[derive(Debug, Clone)]
pub struct MetadataStore {
    storage_root: PathBuf,
}

impl MetadataStore {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        MetadataStore {
            storage_root: storage_root.into(),
        }
    }

    fn meta_path(&self, id: Uuid) -> PathBuf {
        self.storage_root.join(id.to_string()).join(META_FILENAME)
    }

    /// Persist the metadata document. Create-once in the normal flow; the
    /// orchestrator never writes twice for the same id.
    pub async fn write(&self, id: Uuid, meta: &CourseMeta) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(meta)
            .map_err(|e| AppError::Internal(format!("Failed to serialize metadata: {}", e)))?;
        fs::write(self.meta_path(id), json).await?;
        Ok(())
    }

    /// Read the metadata document. Absence is `Ok(None)` so callers can
    /// synthesize defaults; a present-but-malformed document is a
    /// per-course `MetadataCorrupt` error.
    pub async fn read(&self, id: Uuid) -> Result<Option<CourseMeta>, AppError> {
        let path = self.meta_path(id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let meta = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::MetadataCorrupt(format!("{}: {}", id, e)))?;
        Ok(Some(meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn meta() -> CourseMeta {
        CourseMeta {
            name: "mycourse".to_string(),
            upload_date: Utc::now(),
            entry_path: "/index.html".to_string(),
            original_filename: "mycourse.zip".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::new(dir.path());
        let id = Uuid::new_v4();
        fs::create_dir(dir.path().join(id.to_string())).await.unwrap();

        let written = meta();
        store.write(id, &written).await.unwrap();

        let read = store.read(id).await.unwrap().unwrap();
        assert_eq!(read, written);
    }

    #[tokio::test]
    async fn test_absent_metadata_is_none_not_error() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::new(dir.path());

        let read = store.read(Uuid::new_v4()).await.unwrap();
        assert_eq!(read, None);
    }

    #[tokio::test]
    async fn test_malformed_metadata_is_corrupt_error() {
        let dir = tempdir().unwrap();
        let store = MetadataStore::new(dir.path());
        let id = Uuid::new_v4();
        let course_dir = dir.path().join(id.to_string());
        fs::create_dir(&course_dir).await.unwrap();
        fs::write(course_dir.join(META_FILENAME), b"{ not json")
            .await
            .unwrap();

        let result = store.read(id).await;
        assert!(matches!(result, Err(AppError::MetadataCorrupt(_))));
    }
}
