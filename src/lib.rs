//! # tubetone - YouTube audio downloader
//!
//! Thin orchestration layer around yt-dlp: give it a video URL and it
//! fetches the audio track, transcodes it to the requested format and
//! retries on failure. Exposed through a CLI (including an interactive
//! mode) and a small JSON web API.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tubetone::{Config, DownloadRequest, Orchestrator, YtDlp};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let orchestrator = Orchestrator::from_config(YtDlp::new("yt-dlp"), &config);
//!
//!     let request = DownloadRequest::new("https://youtu.be/dQw4w9WgXcQ", &config);
//!     let result = orchestrator.download(&request).await;
//!     if let Some(path) = result.file_path {
//!         println!("Downloaded: {}", path.display());
//!     }
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod server;
pub mod utils;

// Re-export main types
pub use backend::{MediaBackend, TranscodeOptions, YtDlp};
pub use config::{AudioFormat, AudioQuality, Config};
pub use core::{DownloadRequest, DownloadResult, Orchestrator, VideoMetadata};
pub use error::DownloadError;

/// Result type alias for tubetone operations
pub type Result<T> = std::result::Result<T, DownloadError>;
