use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;

/// Application configuration loaded from environment variables. Everything
/// has a default, so startup never fails on a missing variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted document. `CV_DATA_DIR` overrides
    /// the platform data directory.
    pub data_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let data_dir = match std::env::var("CV_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir(),
        };

        Ok(Config {
            data_dir,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "builder")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
