//! Utility functions for tubetone

pub mod filename;
pub mod url;

pub use filename::sanitize_filename;
pub use url::extract_video_id;
