//! Web API route handlers
//!
//! Thin translation layer: validate the URL, call the orchestrator, map
//! the result to a status code. Failed downloads surface as a generic
//! "Download failed" regardless of the underlying error kind.

use actix_web::{web, HttpResponse, Responder};
use async_stream::stream;
use serde::Deserialize;
use serde_json::json;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::backend::YtDlp;
use crate::config::{AudioFormat, AudioQuality};
use crate::core::{DownloadRequest, Orchestrator};
use crate::server::AppState;
use crate::utils::extract_video_id;

#[derive(Deserialize)]
pub struct InfoRequest {
    pub url: String,
}

#[derive(Deserialize)]
pub struct DownloadBody {
    pub url: String,
    /// Bitrate in kbps; defaults to the configured quality
    pub quality: Option<u32>,
    /// Format name; defaults to the configured format
    pub format: Option<String>,
    /// Custom filename without extension
    pub name: Option<String>,
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "tubetone",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "Health check",
            "POST /api/info": "Get video info (body: {url})",
            "POST /api/download": "Download audio (body: {url, quality, format, name})",
            "GET /api/get-file/{filename}": "Fetch a downloaded file; the file is deleted after sending"
        }
    }))
}

/// Shells validate the URL before the orchestrator ever sees it
fn validate_url(url: &str) -> Result<(), HttpResponse> {
    if url.trim().is_empty() {
        return Err(HttpResponse::BadRequest().json(json!({"error": "URL is required"})));
    }
    if extract_video_id(url).is_none() {
        return Err(HttpResponse::BadRequest().json(json!({"error": "Invalid YouTube URL"})));
    }
    Ok(())
}

fn orchestrator_for(state: &AppState) -> Orchestrator<YtDlp> {
    Orchestrator::from_config(YtDlp::new(&state.config.ytdlp_bin), &state.config)
}

pub async fn info(req: web::Json<InfoRequest>, state: web::Data<AppState>) -> impl Responder {
    if let Err(resp) = validate_url(&req.url) {
        return resp;
    }

    match orchestrator_for(&state).video_info(&req.url).await {
        Ok(meta) => HttpResponse::Ok().json(json!({"success": true, "info": meta})),
        Err(e) => {
            warn!(url = %req.url, error = %e, "info fetch failed");
            HttpResponse::InternalServerError()
                .json(json!({"error": "Failed to get video information"}))
        }
    }
}

pub async fn download(req: web::Json<DownloadBody>, state: web::Data<AppState>) -> impl Responder {
    if let Err(resp) = validate_url(&req.url) {
        return resp;
    }

    let quality = match req.quality {
        Some(kbps) => match AudioQuality::from_kbps(kbps) {
            Some(q) => q,
            None => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": "Invalid quality (expected: 128|192|256|320)"}));
            }
        },
        None => state.config.audio_quality,
    };
    let format = match req.format.as_deref() {
        Some(name) => match AudioFormat::from_name(name) {
            Some(f) => f,
            None => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": "Invalid format (expected: mp3|aac|m4a|opus|wav|flac)"}));
            }
        },
        None => state.config.audio_format,
    };

    let mut request = DownloadRequest::new(req.url.clone(), &state.config)
        .with_quality(quality)
        .with_format(format);
    if let Some(name) = &req.name {
        request = request.with_custom_filename(name);
    }

    let result = orchestrator_for(&state).download(&request).await;
    match result.file_path {
        Some(path) => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            HttpResponse::Ok().json(json!({
                "success": true,
                "filename": filename,
                "filepath": path.to_string_lossy()
            }))
        }
        None => HttpResponse::InternalServerError().json(json!({"error": "Download failed"})),
    }
}

/// Reject anything that is not a bare filename inside the downloads dir
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

/// Serve a downloaded file, then delete it once fully sent
pub async fn get_file(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let filename = path.into_inner();
    if !is_safe_filename(&filename) {
        return HttpResponse::NotFound().json(json!({"error": "File not found"}));
    }

    let filepath = state.config.output_dir.join(&filename);
    let meta = match tokio::fs::metadata(&filepath).await {
        Ok(m) if m.is_file() => m,
        _ => return HttpResponse::NotFound().json(json!({"error": "File not found"})),
    };

    let body = stream! {
        let mut file = match File::open(&filepath).await {
            Ok(f) => f,
            Err(e) => {
                yield Err(e);
                return;
            }
        };

        let mut buffer = vec![0u8; 64 * 1024];
        loop {
            match file.read(&mut buffer).await {
                Ok(0) => break,
                Ok(n) => yield Ok(bytes::Bytes::copy_from_slice(&buffer[..n])),
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
        drop(file);

        // One-shot delivery: the file is gone once the response ends.
        match tokio::fs::remove_file(&filepath).await {
            Ok(()) => info!(path = %filepath.display(), "deleted file after sending"),
            Err(e) => warn!(path = %filepath.display(), error = %e, "failed to delete file"),
        }
    };

    HttpResponse::Ok()
        .content_type("application/octet-stream")
        .append_header((actix_web::http::header::CONTENT_LENGTH, meta.len().to_string()))
        .append_header((
            actix_web::http::header::CONTENT_DISPOSITION,
            format!(r#"attachment; filename="{filename}""#),
        ))
        .append_header((actix_web::http::header::CACHE_CONTROL, "no-store"))
        .streaming(body)
}
