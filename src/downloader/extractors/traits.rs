// MediaExtractor trait and raw probe output types

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::downloader::errors::DownloadError;

/// Single-video probe result, deserialized from `yt-dlp --dump-json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideoInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// One entry of the probe's format list. Only the fields the selector
/// cares about; everything else in the yt-dlp output is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormat {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub filesize: Option<f64>,
    #[serde(default)]
    pub filesize_approx: Option<f64>,
}

impl RawFormat {
    /// Exact size when known, approximate otherwise.
    pub fn effective_size(&self) -> Option<f64> {
        self.filesize.or(self.filesize_approx)
    }

    pub fn has_video(&self) -> bool {
        self.vcodec
            .as_deref()
            .map_or(false, |v| v != "none" && !v.is_empty())
    }

    pub fn has_audio(&self) -> bool {
        self.acodec
            .as_deref()
            .map_or(false, |a| a != "none" && !a.is_empty())
    }
}

/// Seam to the external extraction tool. The server never talks to
/// YouTube itself; everything goes through an implementation of this
/// trait.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Probe a single video's metadata and format list without
    /// downloading anything.
    async fn probe(&self, url: &str) -> Result<RawVideoInfo, DownloadError>;

    /// Materialize the stream with the given format id into `dest`.
    async fn fetch(&self, url: &str, format_id: &str, dest: &Path)
        -> Result<(), DownloadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_format_codec_flags() {
        let fmt = RawFormat {
            vcodec: Some("avc1.4d401f".to_string()),
            acodec: Some("none".to_string()),
            ..RawFormat::default()
        };
        assert!(fmt.has_video());
        assert!(!fmt.has_audio());
    }

    #[test]
    fn effective_size_prefers_exact() {
        let fmt = RawFormat {
            filesize: Some(1000.0),
            filesize_approx: Some(2000.0),
            ..RawFormat::default()
        };
        assert_eq!(fmt.effective_size(), Some(1000.0));

        let fmt = RawFormat {
            filesize_approx: Some(2000.0),
            ..RawFormat::default()
        };
        assert_eq!(fmt.effective_size(), Some(2000.0));
    }

    #[test]
    fn probe_output_tolerates_missing_fields() {
        let info: RawVideoInfo = serde_json::from_str(r#"{"title": "clip"}"#).unwrap();
        assert_eq!(info.title.as_deref(), Some("clip"));
        assert!(info.formats.is_empty());
    }
}
