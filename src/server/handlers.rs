// HTTP handlers for the video proxy API

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use tracing::{debug, error, info};

use super::error::ApiError;
use super::AppState;
use crate::downloader::{fetch, resolver, urls, VideoInfo};

#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    itag: Option<String>,
}

/// Embedded single-page client.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Liveness probe for deployment platforms.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": OffsetDateTime::now_utc().unix_timestamp(),
    }))
}

/// Resolve the format list for a video URL, consulting the cache first.
pub async fn get_video_info(
    State(state): State<AppState>,
    Json(request): Json<InfoRequest>,
) -> Result<Json<VideoInfo>, ApiError> {
    let Some(url) = request.url else {
        return Err(ApiError::bad_request("URL is required"));
    };
    let url = url.trim();
    if url.is_empty() {
        return Err(ApiError::bad_request("URL cannot be empty"));
    }

    debug!("processing url: {}", url);
    if !urls::is_valid_youtube_url(url) {
        error!("invalid YouTube url: {}", url);
        return Err(ApiError::bad_request(
            "Invalid YouTube URL. Please enter a valid YouTube video URL.",
        ));
    }

    let Some(video) = urls::parse_video_reference(url) else {
        error!("could not extract video id from: {}", url);
        return Err(ApiError::bad_request("Could not extract video ID from URL"));
    };

    let canonical = video.canonical_url();
    if let Some(cached) = state.cache.lookup(&canonical).await {
        debug!("returning cached info for {}", video.id());
        return Ok(Json(cached));
    }

    let extraction = resolver::resolve_video_info(state.extractor.as_ref(), &video).await;
    let video_info = extraction.map_err(|err| {
        error!("resolution failed for {}: {}", video.id(), err);
        ApiError::resolution(err)
    })?;

    state.cache.store(&canonical, &video_info).await;
    info!("resolved video info for: {}", video_info.title);

    Ok(Json(video_info))
}

/// Download one format and stream it back as an attachment.
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    let url = params.url.as_deref().map(str::trim).unwrap_or_default();
    let itag = params.itag.as_deref().map(str::trim).unwrap_or_default();
    if url.is_empty() || itag.is_empty() {
        return Err(ApiError::bad_request("Missing URL or format ID parameter"));
    }

    if !urls::is_valid_youtube_url(url) {
        return Err(ApiError::bad_request("Invalid YouTube URL"));
    }

    let media = fetch::fetch_format(state.extractor.as_ref(), url, itag)
        .await
        .map_err(|err| {
            error!("download failed for {}: {}", url, err);
            ApiError::download(err)
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(media.mime_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&content_disposition(&media.filename))
            .map_err(|_| ApiError::internal("could not encode download filename"))?,
    );

    Ok((headers, media.bytes).into_response())
}

/// Attachment header with the filename reduced to printable ASCII so the
/// header value is always encodable.
fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c == '"' || c == '\\' {
                '_'
            } else if c.is_ascii_graphic() || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}
