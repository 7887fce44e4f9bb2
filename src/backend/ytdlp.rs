//! yt-dlp subprocess backend
//!
//! Shells out to the yt-dlp binary: `-J` for metadata, `-x` with
//! `--audio-format`/`--audio-quality` for the download+transcode path.
//! Progress lines from stdout are logged; the stderr tail is kept so a
//! failed run produces a useful error message. No timeout is placed around
//! the subprocess.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::backend::{MediaBackend, TranscodeOptions};
use crate::core::{parse_progress_line, VideoMetadata};
use crate::error::DownloadError;

/// Lines of stderr kept for error reporting
const STDERR_TAIL_LINES: usize = 20;

/// Media backend powered by the yt-dlp binary
pub struct YtDlp {
    bin: PathBuf,
}

impl YtDlp {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    fn metadata_args(url: &str) -> Vec<String> {
        vec![
            "--no-playlist".to_string(),
            "--no-cache-dir".to_string(),
            "-J".to_string(),
            url.to_string(),
        ]
    }

    fn transcode_args(url: &str, options: &TranscodeOptions) -> Vec<String> {
        vec![
            "--no-playlist".to_string(),
            "--no-cache-dir".to_string(),
            "-f".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            options.format.extension().to_string(),
            "--audio-quality".to_string(),
            format!("{}K", options.quality.kbps()),
            "--newline".to_string(),
            "-o".to_string(),
            options.output_template.to_string_lossy().to_string(),
            url.to_string(),
        ]
    }
}

/// Keep the last lines of a child's stderr for error messages
async fn collect_stderr_tail(stderr: tokio::process::ChildStderr) -> String {
    let mut tail: VecDeque<String> = VecDeque::new();
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.is_empty() {
            continue;
        }
        debug!(line = %line, "yt-dlp stderr");
        if tail.len() >= STDERR_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(line);
    }
    if tail.is_empty() {
        "no stderr output captured".to_string()
    } else {
        tail.into_iter().collect::<Vec<_>>().join("\n")
    }
}

/// Log `[download]` progress lines as they arrive. Observational only.
async fn log_progress(stdout: tokio::process::ChildStdout) {
    let mut lines = BufReader::new(stdout).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(progress) = parse_progress_line(&line) {
            info!(
                percent = progress.percent,
                speed = progress.speed.as_deref().unwrap_or("N/A"),
                eta = progress.eta.as_deref().unwrap_or("N/A"),
                "download progress"
            );
        } else {
            debug!(line = %line, "yt-dlp");
        }
    }
}

#[async_trait]
impl MediaBackend for YtDlp {
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata, DownloadError> {
        debug!(%url, "fetching metadata");
        let out = Command::new(&self.bin)
            .args(Self::metadata_args(url))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DownloadError::MetadataFetch(format!("failed to run yt-dlp: {e}")))?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(DownloadError::MetadataFetch(format!(
                "yt-dlp exited with {}: {}",
                out.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&out.stdout)
            .map_err(|e| DownloadError::MetadataFetch(format!("unparseable metadata JSON: {e}")))
    }

    async fn fetch_and_transcode(
        &self,
        url: &str,
        options: &TranscodeOptions,
    ) -> Result<(), DownloadError> {
        let mut child = Command::new(&self.bin)
            .args(Self::transcode_args(url, options))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DownloadError::Transcode(format!("failed to start yt-dlp: {e}")))?;

        if let Some(pid) = child.id() {
            debug!(pid, %url, "yt-dlp started");
        }

        let progress_task = child.stdout.take().map(|out| tokio::spawn(log_progress(out)));
        let stderr_task = child.stderr.take().map(|err| tokio::spawn(collect_stderr_tail(err)));

        let status = child
            .wait()
            .await
            .map_err(|e| DownloadError::Transcode(format!("failed waiting for yt-dlp: {e}")))?;

        if let Some(task) = progress_task {
            let _ = task.await;
        }
        let stderr_tail = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        if !status.success() {
            return Err(DownloadError::Transcode(format!(
                "yt-dlp exited with {status}: {stderr_tail}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AudioFormat, AudioQuality};

    #[test]
    fn test_metadata_args() {
        let args = YtDlp::metadata_args("https://youtu.be/abc");
        assert!(args.contains(&"-J".to_string()));
        assert!(args.contains(&"--no-playlist".to_string()));
        assert_eq!(args.last().unwrap(), "https://youtu.be/abc");
    }

    #[test]
    fn test_transcode_args_carry_format_and_quality() {
        let options = TranscodeOptions {
            format: AudioFormat::Opus,
            quality: AudioQuality::Kbps320,
            output_template: PathBuf::from("/tmp/audio/My Song"),
        };
        let args = YtDlp::transcode_args("https://youtu.be/abc", &options);

        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[pos("--audio-format") + 1], "opus");
        assert_eq!(args[pos("--audio-quality") + 1], "320K");
        assert_eq!(args[pos("-o") + 1], "/tmp/audio/My Song");
        assert_eq!(args[pos("-f") + 1], "bestaudio/best");
        assert!(args.contains(&"--extract-audio".to_string()));
        assert!(args.contains(&"--newline".to_string()));
        assert_eq!(args.last().unwrap(), "https://youtu.be/abc");
    }
}
