//! Main entry point for the tubetone CLI and web API

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubetone::backend::YtDlp;
use tubetone::cli::{self, Args};
use tubetone::config::Config;
use tubetone::core::{DownloadRequest, Orchestrator};
use tubetone::server;
use tubetone::utils::extract_video_id;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let mut config = Config::load_or_default(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    if args.serve {
        server::run(config).await?;
        return Ok(());
    }

    let orchestrator = Orchestrator::from_config(YtDlp::new(&config.ytdlp_bin), &config);

    if args.interactive || args.url.is_none() {
        return cli::interactive(&orchestrator, &config).await;
    }

    let url = args.url.clone().unwrap_or_default();
    if url.trim().is_empty() || extract_video_id(&url).is_none() {
        error!("Invalid YouTube URL");
        std::process::exit(1);
    }

    if args.info {
        let meta = orchestrator.video_info(&url).await?;
        cli::print_video_info(&meta);
        return Ok(());
    }

    info!(%url, "starting download");
    let mut request = DownloadRequest::new(url, &config);
    if let Some(name) = &args.name {
        request = request.with_custom_filename(name);
    }

    match orchestrator.download(&request).await.file_path {
        Some(path) => {
            info!(path = %path.display(), "successfully downloaded");
            Ok(())
        }
        None => {
            error!("download failed");
            std::process::exit(1);
        }
    }
}

/// Initialize the tracing subscriber (RUST_LOG aware, info by default)
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}
