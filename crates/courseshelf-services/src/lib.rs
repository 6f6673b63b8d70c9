//! Courseshelf ingestion services
//!
//! The write path: validate an uploaded archive, extract it into an isolated
//! per-course directory, locate the entry document, and persist metadata.
//! The read path: enumerate and look up stored courses.
//!
//! Extraction and scanning are deliberately separate seams (`ArchiveExtractor`
//! and `locator`) so either can be swapped without touching the orchestrator.

pub mod extract;
pub mod ingest;
pub mod locator;
pub mod meta;
pub mod registry;
pub mod validator;

pub use extract::{ArchiveExtractor, ZipExtractor};
pub use ingest::IngestService;
pub use locator::find_entry_document;
pub use meta::{MetadataStore, META_FILENAME};
pub use registry::CourseRegistry;
pub use validator::ArchiveValidator;
