//! Course upload endpoint.
//!
//! Accepts a single-file multipart submission under the `courseFile` field;
//! any other fields are ignored. The part is staged to the upload directory
//! while the size cap is enforced, then handed to the ingestion service.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::Json;
use courseshelf_core::AppError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// The one multipart field honored by this endpoint.
pub const UPLOAD_FIELD: &str = "courseFile";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub course_id: Uuid,
}

pub async fn upload_course(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut staged: Option<(PathBuf, String, u64)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_filename = field.file_name().unwrap_or_default().to_string();
        // Extension check before anything touches disk.
        state.validator.validate(&original_filename, 0)?;

        staged = Some(stage_field(&state, &mut field, original_filename).await?);
        break;
    }

    let Some((staged_path, original_filename, size_bytes)) = staged else {
        return Err(AppError::Validation("No file uploaded".to_string()).into());
    };

    // Spawned so ingestion runs to completion even if the client disconnects
    // mid-request; rollback on failure is then guaranteed to happen.
    let ingest_result = {
        let state = state.clone();
        let staged = staged_path.clone();
        let filename = original_filename.clone();
        tokio::spawn(async move { state.ingest.ingest(&staged, &filename, size_bytes).await })
            .await
            .map_err(|e| AppError::Internal(format!("Ingestion task failed: {}", e)))?
    };

    match ingest_result {
        Ok(course) => Ok(Json(UploadResponse {
            message: "Course uploaded successfully".to_string(),
            course_id: course.id,
        })),
        Err(e) => {
            remove_staged(&staged_path).await;
            Err(e.into())
        }
    }
}

/// Stream the field to `UPLOAD_DIR/{uuid}.zip`, enforcing the size cap as
/// bytes arrive. On failure the staged file is removed before the error
/// surfaces.
async fn stage_field(
    state: &AppState,
    field: &mut Field<'_>,
    original_filename: String,
) -> Result<(PathBuf, String, u64), AppError> {
    fs::create_dir_all(&state.config.upload_dir).await?;
    let staged_path = state
        .config
        .upload_dir
        .join(format!("{}.zip", Uuid::new_v4()));

    match write_field(state, field, &staged_path).await {
        Ok(size_bytes) => Ok((staged_path, original_filename, size_bytes)),
        Err(e) => {
            remove_staged(&staged_path).await;
            Err(e)
        }
    }
}

async fn write_field(
    state: &AppState,
    field: &mut Field<'_>,
    staged_path: &std::path::Path,
) -> Result<u64, AppError> {
    let max_bytes = state.config.max_upload_size_bytes;
    let mut file = fs::File::create(staged_path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload interrupted: {}", e)))?
    {
        written += chunk.len() as u64;
        if written > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} MiB upload limit",
                max_bytes / 1024 / 1024
            )));
        }
        file.write_all(&chunk).await?;
    }
    file.sync_all().await?;

    Ok(written)
}

async fn remove_staged(staged_path: &std::path::Path) {
    if let Err(e) = fs::remove_file(staged_path).await {
        tracing::warn!(
            error = %e,
            path = %staged_path.display(),
            "Failed to remove staged upload"
        );
    }
}
