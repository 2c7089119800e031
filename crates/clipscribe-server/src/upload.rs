//! Streaming multipart uploads to the upload directory

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use clipscribe_config::StorageConfig;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::ApiError;

/// Room for multipart boundaries and part headers on top of the file cap
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Where uploads go and what they may look like
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl UploadSettings {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            dir: config.upload_dir.clone(),
            max_bytes: config.max_upload_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
        }
    }

    /// Request body limit for the upload route
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)).unwrap_or(usize::MAX)
    }

    pub fn check_extension(&self, filename: &str) -> Result<(), ApiError> {
        let extension = extension_of(filename);

        if self.allowed_extensions.iter().any(|allowed| *allowed == extension) {
            Ok(())
        } else {
            Err(ApiError::InvalidFileType(self.allowed_extensions.join(" or ")))
        }
    }

    /// Fresh location for a file uploaded as `filename`
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(stored_file_name(filename))
    }
}

/// Final path component of a client-supplied filename
pub fn base_name(filename: &str) -> &str {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename)
}

/// Extension including the leading dot, or empty
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// `{stem}-{uuid}{ext}`
fn stored_file_name(filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();

    format!("{stem}-{}{}", Uuid::new_v4(), extension_of(filename))
}

/// Copy one multipart field to `path` chunk by chunk, stopping at `max_bytes`
pub async fn write_field(field: &mut Field<'_>, path: &Path, max_bytes: u64) -> Result<u64, ApiError> {
    let mut file = File::create(path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = field.chunk().await? {
        written = written.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        if written > max_bytes {
            return Err(ApiError::FileTooLarge(max_bytes));
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;

    Ok(written)
}

/// Remove a file left behind by a failed upload
pub async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!("failed to remove partial upload {}: {e}", path.display());
    }
}
