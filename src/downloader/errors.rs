// Error types for the extraction and download pipeline

use std::fmt;

#[derive(Debug, Clone)]
pub enum DownloadError {
    /// yt-dlp binary not found on the system
    ToolNotFound(String),

    /// External tool did not finish within the allotted time
    Timeout(u64),

    /// Failed to launch or wait on the external tool
    ExecutionFailed(String),

    /// Failed to parse yt-dlp JSON output
    ParseError(String),

    /// yt-dlp reported an error while probing metadata
    ExtractionFailed(String),

    /// Probe succeeded but nothing survived format filtering
    NoFormats,

    /// No stream matches the requested format identifier
    FormatNotFound(String),

    /// yt-dlp reported an error while materializing the download
    FetchFailed(String),

    /// Download finished but no file was left in the working area
    FileMissing,
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolNotFound(tool) => write!(f, "Tool not found: {}", tool),
            Self::Timeout(secs) => write!(f, "Timed out after {}s", secs),
            Self::ExecutionFailed(msg) => write!(f, "Execution error: {}", msg),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::ExtractionFailed(msg) => write!(f, "Error accessing YouTube: {}", msg),
            Self::NoFormats => write!(
                f,
                "No downloadable formats found. The video may have restrictions."
            ),
            Self::FormatNotFound(_) => write!(f, "Invalid format ID or stream not found"),
            Self::FetchFailed(msg) => write!(f, "Error downloading video: {}", msg),
            Self::FileMissing => write!(f, "Download failed or file not found"),
        }
    }
}

impl std::error::Error for DownloadError {}

/// Condense raw yt-dlp stderr into a short, user-presentable message.
///
/// Prefers explicit `ERROR:` lines; otherwise falls back to the last
/// non-empty line, truncated.
pub fn summarize_stderr(stderr: &str) -> String {
    let important: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("ERROR:") || line.contains("HTTP Error"))
        .take(2)
        .collect();

    if !important.is_empty() {
        return important.join(" | ");
    }

    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("yt-dlp failed without output")
        .chars()
        .take(200)
        .collect()
}
