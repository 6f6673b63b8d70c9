//! Shared setup for API integration tests: a test server wired to temporary
//! storage and upload directories, plus zip fixture builders.

use axum_test::TestServer;
use courseshelf_api::routes::build_router;
use courseshelf_api::state::AppState;
use courseshelf_core::Config;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApp {
    pub server: TestServer,
    pub storage_root: TempDir,
    #[allow(dead_code)] // held so the staging directory outlives the test
    pub upload_dir: TempDir,
}

pub fn setup_test_app() -> TestApp {
    let storage_root = TempDir::new().unwrap();
    let upload_dir = TempDir::new().unwrap();

    let config = Config {
        server_port: 0,
        storage_root: storage_root.path().to_path_buf(),
        upload_dir: upload_dir.path().to_path_buf(),
        max_upload_size_bytes: 50 * 1024 * 1024,
        entry_document: "index.html".to_string(),
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
    };

    let state = Arc::new(AppState::new(config));
    let server = TestServer::new(build_router(state)).unwrap();

    TestApp {
        server,
        storage_root,
        upload_dir,
    }
}

impl TestApp {
    /// Number of course directories currently under the storage root.
    pub fn course_dir_count(&self) -> usize {
        std::fs::read_dir(self.storage_root.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|e| e.path().is_dir())
                    .count()
            })
            .unwrap_or(0)
    }
}

pub mod fixtures {
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;

    /// Build an in-memory zip archive from (entry name, contents) pairs.
    pub fn course_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buffer));
            let options = FileOptions::default();
            for (name, contents) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(contents.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer
    }
}
