//! Core functionality for tubetone

pub mod orchestrator;
pub mod progress;
pub mod video_info;

pub use orchestrator::{DownloadRequest, DownloadResult, Orchestrator};
pub use progress::{parse_progress_line, TranscodeProgress};
pub use video_info::VideoMetadata;
