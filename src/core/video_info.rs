//! Video metadata structures

use serde::{Deserialize, Serialize};

/// Metadata for a single video, as reported by the media backend.
///
/// Deserialized straight from yt-dlp's `-J` output; unknown fields are
/// ignored and everything except the ID is optional because upstream
/// extractors routinely omit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Platform-assigned video ID
    pub id: String,
    /// Video title
    pub title: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Uploader/channel name
    pub uploader: Option<String>,
    /// Thumbnail URL
    pub thumbnail: Option<String>,
    /// View count
    pub view_count: Option<u64>,
}

impl VideoMetadata {
    /// Title to use for display and filenames, falling back to the ID
    pub fn title_or_id(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Duration rounded down to whole seconds
    pub fn duration_secs(&self) -> u64 {
        self.duration.unwrap_or(0.0).max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_ytdlp_json() {
        let raw = r#"{
            "id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "duration": 213.0,
            "uploader": "Rick Astley",
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
            "view_count": 1400000000,
            "formats": [],
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        }"#;

        let meta: VideoMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(meta.id, "dQw4w9WgXcQ");
        assert_eq!(meta.title_or_id(), "Never Gonna Give You Up");
        assert_eq!(meta.duration_secs(), 213);
        assert_eq!(meta.view_count, Some(1_400_000_000));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let meta: VideoMetadata = serde_json::from_str(r#"{"id": "abc123"}"#).unwrap();
        assert_eq!(meta.title, None);
        assert_eq!(meta.title_or_id(), "abc123");
        assert_eq!(meta.duration_secs(), 0);
    }
}
