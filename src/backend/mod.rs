//! External media backend
//!
//! The orchestrator treats the media tool as a black box with two
//! capabilities: fetch metadata, and fetch-plus-transcode audio to disk.
//! [`MediaBackend`] is that seam; [`YtDlp`] is the production
//! implementation. Tests substitute their own.

pub mod ytdlp;

pub use ytdlp::YtDlp;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::{AudioFormat, AudioQuality};
use crate::core::VideoMetadata;
use crate::error::DownloadError;

/// Options for one fetch-and-transcode call
#[derive(Debug, Clone)]
pub struct TranscodeOptions {
    pub format: AudioFormat,
    pub quality: AudioQuality,
    /// Output path without the audio extension; the tool appends it
    pub output_template: PathBuf,
}

/// Capability surface of the external media tool
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Fetch metadata for a video without downloading it
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata, DownloadError>;

    /// Download the audio stream and transcode it, writing files under the
    /// output template as a side effect
    async fn fetch_and_transcode(
        &self,
        url: &str,
        options: &TranscodeOptions,
    ) -> Result<(), DownloadError>;
}
