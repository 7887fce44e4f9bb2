//! Command line shell
//!
//! Validates input, calls the orchestrator and formats output. The
//! interactive mode mirrors the one-URL-at-a-time flow: prompt, preview
//! the video info, confirm, download.

pub mod args;

pub use args::Args;

use std::io::{self, Write};

use colored::Colorize;

use crate::backend::MediaBackend;
use crate::config::Config;
use crate::core::{DownloadRequest, Orchestrator, VideoMetadata};
use crate::utils::extract_video_id;

/// Print video metadata in the `--info` layout
pub fn print_video_info(meta: &VideoMetadata) {
    println!();
    println!("{}", "Video Information:".bold());
    println!("   ID: {}", meta.id);
    println!("   Title: {}", meta.title_or_id());
    if let Some(uploader) = &meta.uploader {
        println!("   Uploader: {uploader}");
    }
    println!("   Duration: {} seconds", meta.duration_secs());
    if let Some(views) = meta.view_count {
        println!("   Views: {views}");
    }
    if let Some(thumbnail) = &meta.thumbnail {
        println!("   Thumbnail: {thumbnail}");
    }
    println!();
}

/// Prompt-driven loop: URL in, audio file out, until quit or EOF
pub async fn interactive<B: MediaBackend>(
    orchestrator: &Orchestrator<B>,
    config: &Config,
) -> anyhow::Result<()> {
    println!("\n{}", "=".repeat(50));
    println!("  tubetone - interactive mode");
    println!("{}\n", "=".repeat(50));

    loop {
        let Some(input) = prompt("Enter YouTube URL (or 'quit' to exit): ")? else {
            break;
        };
        let url = input.trim();

        if matches!(url.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("\nBye.");
            break;
        }
        if url.is_empty() {
            println!("Please enter a URL.\n");
            continue;
        }
        if extract_video_id(url).is_none() {
            println!("{}\n", "Invalid YouTube URL. Please try again.".red());
            continue;
        }

        println!("\nFetching video information...");
        match orchestrator.video_info(url).await {
            Ok(meta) => print_video_info(&meta),
            Err(e) => println!("{}\n", format!("Failed to fetch info: {e}").red()),
        }

        let Some(confirm) = prompt("Download this video's audio? (y/n): ")? else {
            break;
        };
        if confirm.trim().to_lowercase() != "y" {
            println!("Skipped.\n");
            continue;
        }

        println!("\nStarting download...");
        let request = DownloadRequest::new(url, config);
        match orchestrator.download(&request).await.file_path {
            Some(path) => println!("{}\n", format!("Downloaded: {}", path.display()).green()),
            None => println!("{}\n", "Download failed.".red()),
        }
    }

    Ok(())
}

/// Read one line from stdin; `None` on EOF
fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    Ok((read > 0).then_some(line))
}
