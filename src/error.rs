//! Error types for tubetone

use thiserror::Error;

/// Main error type for download operations
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Metadata fetch failed: {0}")]
    MetadataFetch(String),

    #[error("Transcode failed: {0}")]
    Transcode(String),

    #[error("Download failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DownloadError {
    /// Check if error is retryable
    ///
    /// Anything that goes wrong while talking to the backend or the
    /// filesystem counts as retryable; only an unrecognized URL and the
    /// terminal retry exhaustion do not.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            DownloadError::InvalidUrl(_) | DownloadError::RetriesExhausted { .. }
        )
    }
}
