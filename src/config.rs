//! Configuration for the downloader, CLI and web API

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Target audio container/codec for the transcode step
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Aac,
    M4a,
    Opus,
    Wav,
    Flac,
}

impl AudioFormat {
    /// File extension (also the value passed to yt-dlp's --audio-format)
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Aac => "aac",
            AudioFormat::M4a => "m4a",
            AudioFormat::Opus => "opus",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
        }
    }

    /// Parse a format name as it appears in configs and API requests
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mp3" => Some(AudioFormat::Mp3),
            "aac" => Some(AudioFormat::Aac),
            "m4a" => Some(AudioFormat::M4a),
            "opus" => Some(AudioFormat::Opus),
            "wav" => Some(AudioFormat::Wav),
            "flac" => Some(AudioFormat::Flac),
            _ => None,
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        AudioFormat::Mp3
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Target audio bitrate in kbps
///
/// Configs and API requests carry the numeric kbps value; see
/// [`AudioQuality::from_kbps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioQuality {
    #[value(name = "128")]
    Kbps128,
    #[value(name = "192")]
    Kbps192,
    #[value(name = "256")]
    Kbps256,
    #[value(name = "320")]
    Kbps320,
}

impl AudioQuality {
    pub fn kbps(&self) -> u32 {
        match self {
            AudioQuality::Kbps128 => 128,
            AudioQuality::Kbps192 => 192,
            AudioQuality::Kbps256 => 256,
            AudioQuality::Kbps320 => 320,
        }
    }

    pub fn from_kbps(kbps: u32) -> Option<Self> {
        match kbps {
            128 => Some(AudioQuality::Kbps128),
            192 => Some(AudioQuality::Kbps192),
            256 => Some(AudioQuality::Kbps256),
            320 => Some(AudioQuality::Kbps320),
            _ => None,
        }
    }
}

impl Default for AudioQuality {
    fn default() -> Self {
        AudioQuality::Kbps192
    }
}

impl std::fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kbps())
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory downloaded audio is written to
    pub output_dir: PathBuf,
    /// Download attempts before giving up
    pub max_retries: u32,
    /// Blocking pause between attempts, in seconds
    pub retry_delay_secs: u64,
    pub audio_quality: AudioQuality,
    pub audio_format: AudioFormat,
    /// yt-dlp binary (name resolved via PATH, or an absolute path)
    pub ytdlp_bin: PathBuf,
    /// Address the web API binds to
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./downloads"),
            max_retries: 3,
            retry_delay_secs: 2,
            audio_quality: AudioQuality::default(),
            audio_format: AudioFormat::default(),
            ytdlp_bin: PathBuf::from("yt-dlp"),
            listen_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Raw shape of config.toml; every field optional, defaults fill the rest
#[derive(Debug, Deserialize)]
struct ConfigFile {
    output_dir: Option<String>,
    max_retries: Option<u32>,
    retry_delay_secs: Option<u64>,
    audio_quality: Option<u32>,
    audio_format: Option<String>,
    ytdlp_bin: Option<String>,
    listen_addr: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file, overlaying the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&raw)
    }

    /// Load from an explicit path, or fall back to defaults when none is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn from_toml(raw: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw).context("Failed to parse config.toml")?;
        let defaults = Self::default();

        let audio_quality = match file.audio_quality {
            Some(kbps) => AudioQuality::from_kbps(kbps)
                .ok_or_else(|| anyhow!("Invalid audio_quality: {} (expected: 128|192|256|320)", kbps))?,
            None => defaults.audio_quality,
        };

        let audio_format = match file.audio_format.as_deref() {
            Some(name) => AudioFormat::from_name(name).ok_or_else(|| {
                anyhow!("Invalid audio_format: {} (expected: mp3|aac|m4a|opus|wav|flac)", name)
            })?,
            None => defaults.audio_format,
        };

        Ok(Self {
            output_dir: file.output_dir.map(PathBuf::from).unwrap_or(defaults.output_dir),
            max_retries: file.max_retries.unwrap_or(defaults.max_retries),
            retry_delay_secs: file.retry_delay_secs.unwrap_or(defaults.retry_delay_secs),
            audio_quality,
            audio_format,
            ytdlp_bin: file.ytdlp_bin.map(PathBuf::from).unwrap_or(defaults.ytdlp_bin),
            listen_addr: file.listen_addr.unwrap_or(defaults.listen_addr),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("./downloads"));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_secs, 2);
        assert_eq!(config.audio_quality, AudioQuality::Kbps192);
        assert_eq!(config.audio_format, AudioFormat::Mp3);
        assert_eq!(config.listen_addr, "0.0.0.0:5000");
    }

    #[test]
    fn test_from_toml_overlays_defaults() {
        let config = Config::from_toml(
            r#"
            output_dir = "/tmp/audio"
            audio_quality = 320
            audio_format = "flac"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/audio"));
        assert_eq!(config.audio_quality, AudioQuality::Kbps320);
        assert_eq!(config.audio_format, AudioFormat::Flac);
        // Untouched fields keep their defaults
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_secs, 2);
    }

    #[test]
    fn test_from_toml_rejects_unknown_quality() {
        assert!(Config::from_toml("audio_quality = 999").is_err());
        assert!(Config::from_toml(r#"audio_format = "ogg""#).is_err());
    }

    #[test]
    fn test_quality_round_trip() {
        for kbps in [128u32, 192, 256, 320] {
            assert_eq!(AudioQuality::from_kbps(kbps).unwrap().kbps(), kbps);
        }
        assert!(AudioQuality::from_kbps(64).is_none());
    }

    #[test]
    fn test_format_names() {
        for name in ["mp3", "aac", "m4a", "opus", "wav", "flac"] {
            assert_eq!(AudioFormat::from_name(name).unwrap().extension(), name);
        }
        assert!(AudioFormat::from_name("ogg").is_none());
    }
}
