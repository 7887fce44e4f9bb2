//! Video ID extraction from the URL formats YouTube hands out
//!
//! Plain string inspection, evaluated in order with first match winning.
//! Deliberately avoids a URL parser dependency: the rules are a handful of
//! substring checks and the matching is case-sensitive with no
//! normalization of the extracted ID.

/// Extract the video ID from a YouTube URL, or `None` if the URL matches
/// no known format.
pub fn extract_video_id(url: &str) -> Option<String> {
    // Short youtu.be links: the ID is the last path segment, minus any query.
    if url.contains("youtu.be") {
        let segment = url.rsplit('/').next().unwrap_or("");
        let id = segment.split('?').next().unwrap_or(segment);
        return non_empty(id);
    }

    // Canonical watch URLs: everything after v= up to the next &.
    if url.contains("youtube.com") {
        if let Some(idx) = url.find("v=") {
            let rest = &url[idx + 2..];
            let id = rest.split('&').next().unwrap_or(rest);
            return non_empty(id);
        }
    }

    // /shorts/ and /embed/ paths: the ID is the [A-Za-z0-9_-] run right
    // after the marker.
    if let Some(idx) = url.find("/shorts/") {
        return id_run(&url[idx + "/shorts/".len()..]);
    }
    if let Some(idx) = url.find("/embed/") {
        return id_run(&url[idx + "/embed/".len()..]);
    }

    None
}

fn non_empty(id: &str) -> Option<String> {
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

fn id_run(rest: &str) -> Option<String> {
    let id: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    non_empty(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_link_strips_query() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=5").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=10s&list=PLxxxx").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_watch_url_stops_at_ampersand() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=XYZ").unwrap(),
            "dQw4w9WgXcQ"
        );
        // No & after v=: the full remainder is the ID
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abc123_-").unwrap(),
            "abc123_-"
        );
        // ID run stops at the first character outside [A-Za-z0-9_-]
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/brZCOVlyPPo?feature=share").unwrap(),
            "brZCOVlyPPo"
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_unrecognized_urls_return_none() {
        assert_eq!(extract_video_id("https://example.com"), None);
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/channel/UCxxx"), None);
        assert_eq!(extract_video_id("not-a-url"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_empty_ids_return_none() {
        assert_eq!(extract_video_id("https://youtu.be/"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/shorts/"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/embed/"), None);
    }

    #[test]
    fn test_case_sensitive() {
        // Host matching is case-sensitive by design: no normalization.
        assert_eq!(extract_video_id("https://YOUTU.BE/dQw4w9WgXcQ"), None);
    }
}
