//! Archive extraction into an isolated destination directory.
//!
//! The destination is created exclusively for one extraction and is removed
//! in full if anything goes wrong, so a failed ingestion never leaves partial
//! state behind. Entry paths are validated with `enclosed_name()`; a single
//! path-escaping entry fails the whole extraction.

use async_trait::async_trait;
use courseshelf_core::AppError;
use std::fs;
use std::io;
use std::path::Path;

/// Upper bound on archive entries, against pathological archives.
const MAX_ARCHIVE_ENTRIES: usize = 50_000;

/// Upper bound on cumulative uncompressed size (zip-bomb guard).
const MAX_EXTRACTED_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Extraction seam. The orchestrator only depends on this trait, so a
/// different extractor (e.g. a streaming one) can be swapped in later.
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    /// Extract `archive_path` into `dest_dir`, which must not exist yet.
    async fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<(), AppError>;
}

/// Production extractor for zip archives.
#[derive(Debug, Clone, Default)]
pub struct ZipExtractor;

#[async_trait]
impl ArchiveExtractor for ZipExtractor {
    async fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<(), AppError> {
        let archive_path = archive_path.to_path_buf();
        let dest_dir = dest_dir.to_path_buf();

        // zip is synchronous; keep the runtime free for concurrent requests.
        tokio::task::spawn_blocking(move || extract_blocking(&archive_path, &dest_dir))
            .await
            .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))?
    }
}

fn extract_blocking(archive_path: &Path, dest_dir: &Path) -> Result<(), AppError> {
    // Exclusive create: an existing directory means an id collision or a
    // half-cleaned previous run, never something to silently reuse.
    if let Some(parent) = dest_dir.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir(dest_dir)?;

    let result = extract_entries(archive_path, dest_dir);
    if result.is_err() {
        if let Err(cleanup_err) = fs::remove_dir_all(dest_dir) {
            tracing::warn!(
                error = %cleanup_err,
                dest = %dest_dir.display(),
                "Failed to remove partially extracted directory"
            );
        }
    }
    result
}

fn extract_entries(archive_path: &Path, dest_dir: &Path) -> Result<(), AppError> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::Extraction(format!("Corrupt or unreadable archive: {}", e)))?;

    if archive.len() > MAX_ARCHIVE_ENTRIES {
        return Err(AppError::Extraction(format!(
            "Archive contains {} entries, more than the {} allowed",
            archive.len(),
            MAX_ARCHIVE_ENTRIES
        )));
    }

    let mut total_bytes: u64 = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| AppError::Extraction(format!("Corrupt archive entry: {}", e)))?;

        let relative = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => {
                return Err(AppError::Extraction(format!(
                    "Archive entry escapes the extraction directory: {}",
                    entry.name()
                )));
            }
        };
        let outpath = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }

        total_bytes = total_bytes.saturating_add(entry.size());
        if total_bytes > MAX_EXTRACTED_BYTES {
            return Err(AppError::Extraction(format!(
                "Archive expands past the {} byte extraction limit",
                MAX_EXTRACTED_BYTES
            )));
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = fs::File::create(&outpath)?;
        io::copy(&mut entry, &mut outfile)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}
