//! Retrying download orchestrator
//!
//! Coordinates one download end to end: resolve the video ID, decide the
//! target filename, short-circuit if the file already exists, delegate the
//! actual fetch/transcode to the media backend and retry on failure. All
//! network and media work happens in the backend; this module is control
//! flow only.

use std::path::PathBuf;
use std::time::Duration;

use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::backend::{MediaBackend, TranscodeOptions};
use crate::config::{AudioFormat, AudioQuality, Config};
use crate::core::VideoMetadata;
use crate::error::DownloadError;
use crate::utils::{extract_video_id, sanitize_filename};

/// Everything needed for one download invocation
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Video URL
    pub url: String,
    /// Target bitrate
    pub quality: AudioQuality,
    /// Target format
    pub format: AudioFormat,
    /// Filename override (without extension); when set, no title fetch
    /// happens for naming
    pub custom_filename: Option<String>,
    /// Directory the file is written to
    pub output_dir: PathBuf,
}

impl DownloadRequest {
    /// Create a request for `url` with quality/format/output taken from config
    pub fn new(url: impl Into<String>, config: &Config) -> Self {
        Self {
            url: url.into(),
            quality: config.audio_quality,
            format: config.audio_format,
            custom_filename: None,
            output_dir: config.output_dir.clone(),
        }
    }

    /// Set a custom filename (without extension)
    pub fn with_custom_filename(mut self, name: impl Into<String>) -> Self {
        self.custom_filename = Some(name.into());
        self
    }

    /// Set the target quality
    pub fn with_quality(mut self, quality: AudioQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the target format
    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Outcome of one orchestrator invocation
#[derive(Debug)]
pub struct DownloadResult {
    /// Final on-disk path when the download succeeded
    pub file_path: Option<PathBuf>,
    /// Terminal error when it did not
    pub error: Option<DownloadError>,
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        self.file_path.is_some()
    }

    fn success(path: PathBuf) -> Self {
        Self {
            file_path: Some(path),
            error: None,
        }
    }

    fn failure(error: DownloadError) -> Self {
        Self {
            file_path: None,
            error: Some(error),
        }
    }
}

/// The retrying download orchestrator.
///
/// Explicitly constructed and handed its backend; there is no shared
/// default instance. Each invocation is sequential: retries never race and
/// [`Orchestrator::download_multiple`] drains one URL fully before starting
/// the next.
pub struct Orchestrator<B> {
    backend: B,
    max_retries: u32,
    retry_delay: Duration,
}

impl<B: MediaBackend> Orchestrator<B> {
    /// Create an orchestrator with default retry settings (3 attempts, 2s apart)
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
        }
    }

    /// Create an orchestrator with retry settings from config
    pub fn from_config(backend: B, config: &Config) -> Self {
        Self::new(backend)
            .with_max_retries(config.max_retries)
            .with_retry_delay(Duration::from_secs(config.retry_delay_secs))
    }

    /// Set the number of download attempts before giving up
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the pause between attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Fetch metadata for a video without downloading anything
    pub async fn video_info(&self, url: &str) -> Result<VideoMetadata, DownloadError> {
        self.backend.fetch_metadata(url).await
    }

    /// Download the audio for one video, retrying on failure.
    ///
    /// Failures inside an attempt are never propagated raw: each attempt
    /// reports a `Result` and the loop inspects the error kind to decide
    /// whether to retry. After the last retryable failure the caller sees
    /// `RetriesExhausted`.
    pub async fn download(&self, request: &DownloadRequest) -> DownloadResult {
        for attempt in 1..=self.max_retries {
            info!(
                url = %request.url,
                attempt,
                max_attempts = self.max_retries,
                "downloading audio"
            );

            match self.try_once(request).await {
                Ok(path) => {
                    info!(path = %path.display(), "download complete");
                    return DownloadResult::success(path);
                }
                Err(e) if !e.is_retryable() => {
                    error!(error = %e, "download failed");
                    return DownloadResult::failure(e);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "download attempt failed");
                    if attempt < self.max_retries {
                        debug!(delay = ?self.retry_delay, "retrying");
                        tokio::time::sleep(self.retry_delay).await;
                    } else {
                        error!(attempts = self.max_retries, last_error = %e, "retries exhausted");
                    }
                }
            }
        }

        DownloadResult::failure(DownloadError::RetriesExhausted {
            attempts: self.max_retries,
        })
    }

    /// Download several videos, strictly one at a time.
    ///
    /// Each URL gets a copy of `base` with the URL swapped in and any
    /// custom filename cleared (a shared name would make the files clobber
    /// each other). One URL is fully drained before the next starts.
    pub async fn download_multiple(
        &self,
        urls: &[String],
        base: &DownloadRequest,
    ) -> Vec<DownloadResult> {
        let mut results = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            info!(current = i + 1, total = urls.len(), %url, "processing");
            let request = DownloadRequest {
                url: url.clone(),
                custom_filename: None,
                ..base.clone()
            };
            results.push(self.download(&request).await);
        }
        results
    }

    /// One download attempt
    async fn try_once(&self, request: &DownloadRequest) -> Result<PathBuf, DownloadError> {
        // Resolve the video ID; fall back to the backend's reported ID when
        // the URL matches none of the known patterns.
        let video_id = match extract_video_id(&request.url) {
            Some(id) => id,
            None => self.backend.fetch_metadata(&request.url).await?.id,
        };
        debug!(%video_id, "resolved video id");

        // Decide the filename. A custom name never triggers a title fetch;
        // otherwise the title comes from a metadata call of its own (a
        // second one when the ID fallback above also fetched - kept as is,
        // see DESIGN.md).
        let ext = request.format.extension();
        let stem = match &request.custom_filename {
            Some(name) => sanitize_filename(name),
            None => {
                let meta = self.backend.fetch_metadata(&request.url).await?;
                sanitize_filename(meta.title.as_deref().unwrap_or(&video_id))
            }
        };
        let filename = format!("{stem}.{ext}");
        let output_path = request.output_dir.join(&filename);
        debug!(path = %output_path.display(), "target path");

        // Idempotent short-circuit: an existing file is the result.
        if output_path.exists() {
            info!(path = %output_path.display(), "audio already downloaded");
            return Ok(output_path);
        }

        fs::create_dir_all(&request.output_dir).await?;

        // Delegate. The template carries no extension; the tool appends it.
        let options = TranscodeOptions {
            format: request.format,
            quality: request.quality,
            output_template: request.output_dir.join(&stem),
        };
        info!(quality = %request.quality, format = %request.format, "transcoding audio");
        self.backend.fetch_and_transcode(&request.url, &options).await?;

        // The tool may normalize the extension itself, so reconcile both
        // candidate paths before declaring the output missing.
        if output_path.exists() {
            return Ok(output_path);
        }
        let stripped = stem.strip_suffix(&format!(".{ext}")).unwrap_or(&stem);
        let alt_path = request.output_dir.join(format!("{stripped}.{ext}"));
        if alt_path.exists() {
            return Ok(alt_path);
        }

        Err(DownloadError::Transcode(
            "output file missing after transcode".to_string(),
        ))
    }
}
