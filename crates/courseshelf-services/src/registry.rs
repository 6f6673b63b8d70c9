//! Read path over the storage root: enumerate and look up stored courses.
//!
//! The registry degrades gracefully: a directory without readable metadata
//! still yields a record (synthesized defaults), and one bad entry never
//! fails a whole listing.

use courseshelf_core::{AppError, Course};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::meta::MetadataStore;

/// Placeholder used to keep an empty storage root under version control.
const GITKEEP: &str = ".gitkeep";

#[derive(Debug, Clone)]
pub struct CourseRegistry {
    storage_root: PathBuf,
    meta: MetadataStore,
}

impl CourseRegistry {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        let storage_root = storage_root.into();
        let meta = MetadataStore::new(storage_root.clone());
        CourseRegistry { storage_root, meta }
    }

    /// Enumerate all stored courses. Ordering is unspecified; callers that
    /// need an order must sort.
    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        fs::create_dir_all(&self.storage_root).await?;

        let mut courses = Vec::new();
        let mut entries = fs::read_dir(&self.storage_root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name == GITKEEP {
                continue;
            }
            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => {}
                _ => continue,
            }
            let Ok(id) = Uuid::parse_str(&name) else {
                tracing::debug!(dir = %name, "Skipping non-course directory");
                continue;
            };

            match self.meta.read(id).await {
                Ok(Some(meta)) => courses.push(Course::from_meta(id, meta)),
                Ok(None) => courses.push(Course::synthesized(id)),
                Err(e) => {
                    tracing::warn!(
                        course_id = %id,
                        error = %e,
                        "Unreadable course metadata, synthesizing record"
                    );
                    courses.push(Course::synthesized(id));
                }
            }
        }

        Ok(courses)
    }

    /// Look up one course. `Ok(None)` when no directory exists for the id.
    pub async fn get_course(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let course_dir = self.storage_root.join(id.to_string());
        if !fs::try_exists(&course_dir).await.unwrap_or(false) {
            return Ok(None);
        }

        match self.meta.read(id).await {
            Ok(Some(meta)) => Ok(Some(Course::from_meta(id, meta))),
            Ok(None) => Ok(Some(Course::synthesized(id))),
            Err(e) => {
                tracing::warn!(
                    course_id = %id,
                    error = %e,
                    "Unreadable course metadata, synthesizing record"
                );
                Ok(Some(Course::synthesized(id)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::META_FILENAME;
    use chrono::Utc;
    use courseshelf_core::CourseMeta;
    use tempfile::tempdir;

    async fn seed_course(root: &std::path::Path, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let dir = root.join(id.to_string());
        fs::create_dir(&dir).await.unwrap();
        let meta = CourseMeta {
            name: name.to_string(),
            upload_date: Utc::now(),
            entry_path: "/index.html".to_string(),
            original_filename: format!("{}.zip", name),
        };
        fs::write(
            dir.join(META_FILENAME),
            serde_json::to_vec(&meta).unwrap(),
        )
        .await
        .unwrap();
        id
    }

    #[tokio::test]
    async fn test_list_returns_seeded_courses() {
        let dir = tempdir().unwrap();
        let registry = CourseRegistry::new(dir.path());

        let a = seed_course(dir.path(), "alpha").await;
        let b = seed_course(dir.path(), "beta").await;

        let mut courses = registry.list_courses().await.unwrap();
        courses.sort_by_key(|c| c.meta.name.clone());

        assert_eq!(courses.len(), 2);
        assert!(courses.iter().any(|c| c.id == a && c.meta.name == "alpha"));
        assert!(courses.iter().any(|c| c.id == b && c.meta.name == "beta"));
    }

    #[tokio::test]
    async fn test_list_skips_gitkeep_and_non_course_entries() {
        let dir = tempdir().unwrap();
        let registry = CourseRegistry::new(dir.path());

        fs::write(dir.path().join(GITKEEP), b"").await.unwrap();
        fs::create_dir(dir.path().join("not-a-uuid")).await.unwrap();
        seed_course(dir.path(), "alpha").await;

        let courses = registry.list_courses().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].meta.name, "alpha");
    }

    #[tokio::test]
    async fn test_list_survives_one_corrupt_metadata() {
        let dir = tempdir().unwrap();
        let registry = CourseRegistry::new(dir.path());

        seed_course(dir.path(), "alpha").await;
        let corrupt = Uuid::new_v4();
        let corrupt_dir = dir.path().join(corrupt.to_string());
        fs::create_dir(&corrupt_dir).await.unwrap();
        fs::write(corrupt_dir.join(META_FILENAME), b"%%%").await.unwrap();

        let courses = registry.list_courses().await.unwrap();
        assert_eq!(courses.len(), 2);

        let fallback = courses.iter().find(|c| c.id == corrupt).unwrap();
        assert_eq!(
            fallback.meta.name,
            format!("Course {}", &corrupt.to_string()[..8])
        );
    }

    #[tokio::test]
    async fn test_list_on_missing_root_creates_it_and_returns_empty() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("courses");
        let registry = CourseRegistry::new(&root);

        let courses = registry.list_courses().await.unwrap();
        assert!(courses.is_empty());
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let dir = tempdir().unwrap();
        let registry = CourseRegistry::new(dir.path());

        let course = registry.get_course(Uuid::new_v4()).await.unwrap();
        assert!(course.is_none());
    }

    #[tokio::test]
    async fn test_get_without_metadata_synthesizes() {
        let dir = tempdir().unwrap();
        let registry = CourseRegistry::new(dir.path());

        let id = Uuid::new_v4();
        fs::create_dir(dir.path().join(id.to_string())).await.unwrap();

        let course = registry.get_course(id).await.unwrap().unwrap();
        assert_eq!(course.id, id);
        assert_eq!(course.path, format!("/courses/{}", id));
    }

    #[tokio::test]
    async fn test_get_is_idempotent() {
        let dir = tempdir().unwrap();
        let registry = CourseRegistry::new(dir.path());
        let id = seed_course(dir.path(), "alpha").await;

        let first = registry.get_course(id).await.unwrap().unwrap();
        let second = registry.get_course(id).await.unwrap().unwrap();
        assert_eq!(first, second);
    }
}
