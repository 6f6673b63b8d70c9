//! Ingestion orchestrator: validation, extraction, entry-point discovery,
//! metadata persistence, staged-file cleanup.
//!
//! Any failure before the metadata is written rolls the course directory back
//! in full; failure to delete the staged archive afterwards is logged and
//! never surfaced, since the course is already usable.

use chrono::Utc;
use courseshelf_core::{display_name, AppError, Course, CourseMeta};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use uuid::Uuid;

use crate::extract::ArchiveExtractor;
use crate::locator::find_entry_document;
use crate::meta::MetadataStore;
use crate::validator::ArchiveValidator;

pub struct IngestService {
    storage_root: PathBuf,
    validator: ArchiveValidator,
    extractor: Arc<dyn ArchiveExtractor>,
    meta: MetadataStore,
    entry_document: String,
}

impl IngestService {
    pub fn new(
        storage_root: impl Into<PathBuf>,
        validator: ArchiveValidator,
        extractor: Arc<dyn ArchiveExtractor>,
        entry_document: impl Into<String>,
    ) -> Self {
        let storage_root = storage_root.into();
        let meta = MetadataStore::new(storage_root.clone());
        IngestService {
            storage_root,
            validator,
            extractor,
            meta,
            entry_document: entry_document.into(),
        }
    }

    /// Ingest a staged archive and return the new course record.
    ///
    /// Each call mints a fresh id; re-uploading the same filename is never
    /// deduplicated. Concurrent ingestions write to disjoint directories.
    pub async fn ingest(
        &self,
        archive_path: &Path,
        original_filename: &str,
        size_bytes: u64,
    ) -> Result<Course, AppError> {
        // Rejections happen before any directory is created.
        self.validator.validate(original_filename, size_bytes)?;

        let id = Uuid::new_v4();
        let course_dir = self.storage_root.join(id.to_string());

        // The extractor removes its own partial state on failure.
        self.extractor.extract(archive_path, &course_dir).await?;

        match self.finish(id, &course_dir, original_filename).await {
            Ok(course) => {
                self.cleanup_staged(archive_path).await;
                tracing::info!(
                    course_id = %id,
                    original_filename = %original_filename,
                    entry_path = %course.meta.entry_path,
                    "Course ingested"
                );
                Ok(course)
            }
            Err(e) => {
                if let Err(cleanup_err) = fs::remove_dir_all(&course_dir).await {
                    tracing::warn!(
                        course_id = %id,
                        error = %cleanup_err,
                        "Failed to roll back course directory"
                    );
                }
                Err(e)
            }
        }
    }

    async fn finish(
        &self,
        id: Uuid,
        course_dir: &Path,
        original_filename: &str,
    ) -> Result<Course, AppError> {
        let root = course_dir.to_path_buf();
        let entry_name = self.entry_document.clone();
        let entry_path = tokio::task::spawn_blocking(move || find_entry_document(&root, &entry_name))
            .await
            .map_err(|e| AppError::Internal(format!("Entry-point scan failed: {}", e)))??
            .unwrap_or_default();

        let meta = CourseMeta {
            name: display_name(original_filename),
            upload_date: Utc::now(),
            entry_path,
            original_filename: original_filename.to_string(),
        };
        self.meta.write(id, &meta).await?;

        Ok(Course::from_meta(id, meta))
    }

    /// Best-effort removal of the staged upload. The course is already
    /// usable, so failure here is logged, never propagated.
    async fn cleanup_staged(&self, archive_path: &Path) {
        if let Err(e) = fs::remove_file(archive_path).await {
            tracing::warn!(
                error = %e,
                path = %archive_path.display(),
                "Failed to remove staged upload"
            );
        }
    }
}
