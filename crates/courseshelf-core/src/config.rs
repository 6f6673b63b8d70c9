//! Configuration module
//!
//! Configuration is read from the environment with sensible defaults, so the
//! server runs out of the box and tests can build a `Config` by hand with
//! temporary directories.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORAGE_ROOT: &str = "public/courses";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 500;
const DEFAULT_ENTRY_DOCUMENT: &str = "index.html";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Directory holding one subdirectory per course id.
    pub storage_root: PathBuf,
    /// Staging directory for uploaded archives before extraction.
    pub upload_dir: PathBuf,
    pub max_upload_size_bytes: u64,
    /// Filename of the entry document to look for in extracted trees.
    pub entry_document: String,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            storage_root: env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_ROOT)),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            entry_document: env::var("ENTRY_DOCUMENT")
                .unwrap_or_else(|_| DEFAULT_ENTRY_DOCUMENT.to_string()),
            cors_origins,
            environment,
        })
    }
}
