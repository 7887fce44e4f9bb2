//! Progress reporting for delegated downloads
//!
//! yt-dlp with `--newline` emits one status line per update, e.g.
//!
//! ```text
//! [download]  42.3% of 4.56MiB at 1.23MiB/s ETA 00:12
//! ```
//!
//! These are parsed into [`TranscodeProgress`] and logged. They are
//! observational only; nothing in the control flow depends on them.

/// A single progress update from the external tool
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeProgress {
    /// Completion percentage (0.0 to 100.0)
    pub percent: f64,
    /// Download speed as reported, e.g. "1.23MiB/s"
    pub speed: Option<String>,
    /// Estimated time remaining as reported, e.g. "00:12"
    pub eta: Option<String>,
}

/// Parse a yt-dlp `[download]` status line, or `None` for any other output.
pub fn parse_progress_line(line: &str) -> Option<TranscodeProgress> {
    let rest = line.strip_prefix("[download]")?.trim();

    let mut tokens = rest.split_whitespace().peekable();
    let percent_token = tokens.next()?;
    let percent: f64 = percent_token.strip_suffix('%')?.parse().ok()?;

    let mut speed = None;
    let mut eta = None;
    while let Some(token) = tokens.next() {
        match token {
            "at" => speed = tokens.next().map(str::to_string),
            "ETA" => eta = tokens.next().map(str::to_string),
            _ => {}
        }
    }

    Some(TranscodeProgress { percent, speed, eta })
}
