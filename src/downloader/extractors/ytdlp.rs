// yt-dlp CLI extractor
//
// Invokes the yt-dlp binary in two modes: a fast metadata probe
// (--dump-json, short socket timeout, few retries) and a more patient
// download run (longer timeouts, more retries, fragment retries).

use std::path::Path;
use std::process::Command as StdCommand;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::traits::{MediaExtractor, RawVideoInfo};
use crate::downloader::errors::{summarize_stderr, DownloadError};
use crate::downloader::utils::run_with_timeout;

// Whole-process limits. Individual network operations inside yt-dlp are
// bounded separately by --socket-timeout and --retries.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);
const FETCH_TIMEOUT: Duration = Duration::from_secs(300);

pub struct YtDlpExtractor {
    binary: String,
}

impl YtDlpExtractor {
    pub fn new() -> Self {
        Self {
            binary: find_ytdlp(),
        }
    }

    fn probe_args(&self, url: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--socket-timeout".to_string(),
            "15".to_string(),
            "--retries".to_string(),
            "2".to_string(),
            "--fragment-retries".to_string(),
            "2".to_string(),
            "--skip-unavailable-fragments".to_string(),
            "--no-check-certificates".to_string(),
            url.to_string(),
        ]
    }

    fn fetch_args(&self, url: &str, format_id: &str, dest: &Path) -> Vec<String> {
        vec![
            "-f".to_string(),
            format_id.to_string(),
            "-o".to_string(),
            format!("{}/%(title)s.%(ext)s", dest.display()),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--socket-timeout".to_string(),
            "30".to_string(),
            "--retries".to_string(),
            "3".to_string(),
            "--fragment-retries".to_string(),
            "3".to_string(),
            "--skip-unavailable-fragments".to_string(),
            "--no-check-certificates".to_string(),
            url.to_string(),
        ]
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn probe(&self, url: &str) -> Result<RawVideoInfo, DownloadError> {
        debug!("probing {} with {}", url, self.binary);
        let output = run_with_timeout(&self.binary, &self.probe_args(url), PROBE_TIMEOUT).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::ExtractionFailed(summarize_stderr(&stderr)));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|err| DownloadError::ParseError(format!("invalid probe JSON: {}", err)))
    }

    async fn fetch(
        &self,
        url: &str,
        format_id: &str,
        dest: &Path,
    ) -> Result<(), DownloadError> {
        info!("downloading format {} of {}", format_id, url);
        let args = self.fetch_args(url, format_id, dest);
        let output = run_with_timeout(&self.binary, &args, FETCH_TIMEOUT).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Requested format is not available") {
                return Err(DownloadError::FormatNotFound(format_id.to_string()));
            }
            return Err(DownloadError::FetchFailed(summarize_stderr(&stderr)));
        }

        Ok(())
    }
}

/// Locate the yt-dlp binary: env override, common install paths, `which`,
/// then hope it is in PATH.
fn find_ytdlp() -> String {
    if let Ok(path) = std::env::var("YTDLP_PATH") {
        if !path.trim().is_empty() {
            return path;
        }
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp",
        "/usr/local/bin/yt-dlp",
        "/usr/bin/yt-dlp",
    ];
    for path in common_paths {
        if Path::new(path).exists() {
            return path.to_string();
        }
    }

    if let Ok(output) = StdCommand::new("which").arg("yt-dlp").output() {
        if output.status.success() {
            if let Ok(path) = String::from_utf8(output.stdout) {
                let trimmed = path.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }

    "yt-dlp".to_string()
}
