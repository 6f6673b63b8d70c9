//! Application state shared by all handlers.

use courseshelf_core::Config;
use courseshelf_services::{ArchiveValidator, CourseRegistry, IngestService, ZipExtractor};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub validator: ArchiveValidator,
    pub ingest: IngestService,
    pub registry: CourseRegistry,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let validator = ArchiveValidator::new("zip", config.max_upload_size_bytes);
        let ingest = IngestService::new(
            config.storage_root.clone(),
            validator.clone(),
            Arc::new(ZipExtractor),
            config.entry_document.clone(),
        );
        let registry = CourseRegistry::new(config.storage_root.clone());

        AppState {
            config,
            validator,
            ingest,
            registry,
        }
    }
}
