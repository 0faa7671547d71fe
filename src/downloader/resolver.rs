// Metadata resolution: probe the extractor and shape the format list

use tracing::debug;

use super::errors::DownloadError;
use super::extractors::MediaExtractor;
use super::format_selector::select_formats;
use super::models::{VideoInfo, VideoReference};

const FALLBACK_TITLE: &str = "Unknown Title";

/// Resolve title, thumbnail and the downloadable format list for a video.
///
/// Errors from the extractor pass through with their message attached;
/// a probe that yields nothing downloadable is its own failure.
pub async fn resolve_video_info(
    extractor: &dyn MediaExtractor,
    video: &VideoReference,
) -> Result<VideoInfo, DownloadError> {
    debug!("resolving {} via {}", video.id(), extractor.name());
    let raw = extractor.probe(&video.canonical_url()).await?;

    let formats = select_formats(&raw.formats);
    debug!("found {} downloadable formats for {}", formats.len(), video.id());
    if formats.is_empty() {
        return Err(DownloadError::NoFormats);
    }

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());
    let thumbnail = raw
        .thumbnail
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| fallback_thumbnail(video));

    Ok(VideoInfo {
        title,
        thumbnail,
        formats,
    })
}

fn fallback_thumbnail(video: &VideoReference) -> String {
    format!(
        "https://img.youtube.com/vi/{}/maxresdefault.jpg",
        video.id()
    )
}
