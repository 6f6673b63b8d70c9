use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Per-course metadata document, persisted as `meta.json` at the root of the
/// course's storage directory. Field names are camelCase on disk and on the
/// wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMeta {
    pub name: String,
    pub upload_date: DateTime<Utc>,
    /// Relative path from the course root to the entry document, with a
    /// leading `/` (e.g. `/a/b/index.html`). Empty when none was found.
    #[serde(default)]
    pub entry_path: String,
    #[serde(default)]
    pub original_filename: String,
}

/// A stored course: the directory id plus its metadata. `path` is the public
/// mount of the extracted tree, where a viewer loads the entry document from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub path: String,
    #[serde(flatten)]
    pub meta: CourseMeta,
}

impl Course {
    pub fn from_meta(id: Uuid, meta: CourseMeta) -> Self {
        Course {
            id,
            path: format!("/courses/{}", id),
            meta,
        }
    }

    /// Fallback record for a course directory whose metadata is absent or
    /// unreadable. Only the id is authoritative; the rest are placeholders.
    pub fn synthesized(id: Uuid) -> Self {
        let id_str = id.to_string();
        Course::from_meta(
            id,
            CourseMeta {
                name: format!("Course {}", &id_str[..8]),
                upload_date: Utc::now(),
                entry_path: String::new(),
                original_filename: String::new(),
            },
        )
    }
}

/// Derive a display name from an uploaded filename by stripping its final
/// extension ("mycourse.zip" -> "mycourse").
pub fn display_name(original_filename: &str) -> String {
    Path::new(original_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| original_filename.to_string())
}
