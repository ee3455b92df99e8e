use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid download url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("download url {0} has no filename in its path")]
    MissingFilename(String),

    #[error("output file {0} already exists")]
    AlreadyExists(PathBuf),

    #[error("transfer failed: {0}")]
    Transfer(#[from] reqwest::Error),

    #[error("disk error: {0}")]
    Disk(#[from] std::io::Error),
}

/// One whole-percent step of download progress. Produced by the engine
/// only while the server has declared a total length, and only when the
/// percent value actually changed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressUpdate {
    pub percent: u64,
    pub bytes_received: u64,
    pub total_bytes: u64,
}

/// Terminal success outcome of one download.
#[derive(Debug, Clone)]
pub struct Downloaded {
    pub path: PathBuf,
    pub bytes_received: u64,
}
