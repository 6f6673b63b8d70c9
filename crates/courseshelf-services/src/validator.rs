//! Pre-extraction checks on an uploaded file: extension and declared size.
//! Deep validation of the archive contents happens during extraction.

use courseshelf_core::AppError;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ArchiveValidator {
    allowed_extension: String,
    max_size_bytes: u64,
}

impl ArchiveValidator {
    pub fn new(allowed_extension: impl Into<String>, max_size_bytes: u64) -> Self {
        ArchiveValidator {
            allowed_extension: allowed_extension.into().to_lowercase(),
            max_size_bytes,
        }
    }

    /// Accept or reject a candidate upload by filename and size. Rejections
    /// carry a user-correctable message.
    pub fn validate(&self, original_filename: &str, size_bytes: u64) -> Result<(), AppError> {
        let filename = original_filename.trim();
        if filename.is_empty() {
            return Err(AppError::Validation("No file uploaded".to_string()));
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        if extension.as_deref() != Some(self.allowed_extension.as_str()) {
            return Err(AppError::Validation(format!(
                "Please upload a .{} file",
                self.allowed_extension
            )));
        }

        if size_bytes > self.max_size_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} MiB upload limit",
                self.max_size_bytes / 1024 / 1024
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ArchiveValidator {
        ArchiveValidator::new("zip", 500 * 1024 * 1024)
    }

    #[test]
    fn test_accepts_zip_case_insensitive() {
        assert!(validator().validate("mycourse.zip", 1024).is_ok());
        assert!(validator().validate("MyCourse.ZIP", 1024).is_ok());
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let result = validator().validate("notes.txt", 1024);
        assert!(matches!(result, Err(AppError::Validation(_))));

        // Extension check is on the final extension only
        let result = validator().validate("sneaky.zip.txt", 1024);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_missing_filename() {
        let result = validator().validate("", 1024);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = validator().validate("   ", 1024);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let result = validator().validate("big.zip", 600 * 1024 * 1024);
        assert!(matches!(result, Err(AppError::PayloadTooLarge(_))));

        // Exactly at the limit is accepted
        assert!(validator().validate("edge.zip", 500 * 1024 * 1024).is_ok());
    }
}
