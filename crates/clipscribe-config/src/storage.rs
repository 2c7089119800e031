use std::path::PathBuf;

use serde::Deserialize;

/// Upload size cap: 25 × 1,848,576 bytes
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 1_848_576 * 25;

/// Record store and upload directory configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite database file, or `:memory:` for a throwaway store
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Directory where uploaded audio files are written
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Accepted file extensions, including the leading dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl StorageConfig {
    /// Whether the record store should live only in memory
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("clipscribe.sqlite")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("tmp")
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_allowed_extensions() -> Vec<String> {
    vec![".mp3".to_owned()]
}
