//! Local upload storage for video files.
//!
//! Files are keyed by the client-supplied filename inside a single upload
//! directory. Re-uploading the same name replaces the previous content.

use std::io;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::constants::VIDEOS_ROUTE_PREFIX;

/// Everything except unreserved URL characters is escaped in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("path escapes the upload directory")]
    OutsideUploadDir,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reject names that would resolve outside the upload directory.
pub fn validate_filename(name: &str) -> Result<&str, StorageError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::InvalidFilename(name.to_string()));
    }
    Ok(name)
}

/// Path clients use to download an uploaded file.
///
/// The filename is percent-encoded so `?`, `#` and `%` in a stored name
/// still route back to `/videos/{filename}`.
pub fn reference_path(filename: &str) -> String {
    format!(
        "{}/{}",
        VIDEOS_ROUTE_PREFIX,
        utf8_percent_encode(filename, SEGMENT)
    )
}

pub async fn ensure_upload_dir(dir: &Path) -> io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}

/// Write an upload, replacing any existing file of the same name.
pub async fn save_upload(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
    let full_path = dir.join(validate_filename(filename)?);
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&full_path, data).await?;
    Ok(full_path)
}

/// Locate an existing upload, refusing anything that resolves outside `dir`.
pub async fn resolve_upload(dir: &Path, filename: &str) -> Result<PathBuf, StorageError> {
    let full_path = dir.join(validate_filename(filename)?);

    // canonicalize() resolves symlinks, so a link pointing out of the
    // directory is caught here
    let canonical = tokio::fs::canonicalize(&full_path).await?;
    let dir_canonical = tokio::fs::canonicalize(dir).await?;
    if !canonical.starts_with(&dir_canonical) {
        return Err(StorageError::OutsideUploadDir);
    }

    Ok(canonical)
}
