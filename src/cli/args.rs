//! Command line argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AudioFormat, AudioQuality, Config};

/// Download YouTube audio via yt-dlp
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YouTube video URL to download
    pub url: Option<String>,

    /// Output directory (default: ./downloads)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Audio quality in kbps
    #[arg(short, long, value_enum, value_name = "KBPS")]
    pub quality: Option<AudioQuality>,

    /// Audio format
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<AudioFormat>,

    /// Custom filename for the downloaded audio (without extension)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Only show video information, do not download
    #[arg(short, long)]
    pub info: bool,

    /// Run in interactive mode
    #[arg(long)]
    pub interactive: bool,

    /// Start the web API instead of downloading
    #[arg(long)]
    pub serve: bool,

    /// Config file overriding the built-in defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Download attempts before giving up
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,
}

impl Args {
    /// Fold CLI overrides into the effective configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.output {
            config.output_dir = dir.clone();
        }
        if let Some(quality) = self.quality {
            config.audio_quality = quality;
        }
        if let Some(format) = self.format {
            config.audio_format = format;
        }
        if let Some(retries) = self.retries {
            config.max_retries = retries;
        }
    }
}
