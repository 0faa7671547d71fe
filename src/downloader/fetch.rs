// Download execution: scoped working area, file discovery, MIME inference

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use super::errors::DownloadError;
use super::extractors::MediaExtractor;

/// A fully materialized media file, read into memory for the response.
#[derive(Debug)]
pub struct FetchedMedia {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Download the stream with the given format id into a scoped working
/// directory and return its contents.
///
/// The working directory is removed on every exit path: `workdir` is an
/// RAII guard that cleans up when this function returns, whether with a
/// result or an error.
pub async fn fetch_format(
    extractor: &dyn MediaExtractor,
    url: &str,
    format_id: &str,
) -> Result<FetchedMedia, DownloadError> {
    let workdir = TempDir::new().map_err(|err| {
        DownloadError::FetchFailed(format!("could not create working directory: {}", err))
    })?;

    debug!("fetching format {} via {}", format_id, extractor.name());
    extractor.fetch(url, format_id, workdir.path()).await?;

    let path = find_downloaded_file(workdir.path())?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(DownloadError::FileMissing)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| DownloadError::FileMissing)?;

    info!("download complete: {} ({} bytes)", filename, bytes.len());

    Ok(FetchedMedia {
        mime_type: mime_for_filename(&filename),
        filename,
        bytes,
    })
}

/// First non-partial file anywhere under the working area.
fn find_downloaded_file(dir: &Path) -> Result<PathBuf, DownloadError> {
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|_| DownloadError::FileMissing)?;
        for entry in entries {
            let entry = entry.map_err(|_| DownloadError::FileMissing)?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.ends_with(".part") && !name.ends_with(".ytdl") {
                return Ok(path);
            }
        }
    }

    Err(DownloadError::FileMissing)
}

/// MIME type from the file extension yt-dlp produced.
pub fn mime_for_filename(name: &str) -> &'static str {
    if name.ends_with(".mp4") {
        "video/mp4"
    } else if name.ends_with(".webm") {
        "video/webm"
    } else if name.ends_with(".mp3") || name.ends_with(".m4a") {
        "audio/mp4"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Writes a fixed file into the working area, like a successful
    /// yt-dlp run would.
    struct WritingExtractor {
        filename: &'static str,
        contents: &'static [u8],
    }

    #[async_trait]
    impl MediaExtractor for WritingExtractor {
        fn name(&self) -> &'static str {
            "writing-stub"
        }

        async fn probe(
            &self,
            _url: &str,
        ) -> Result<crate::downloader::extractors::RawVideoInfo, DownloadError> {
            unreachable!("fetch tests never probe")
        }

        async fn fetch(
            &self,
            _url: &str,
            _format_id: &str,
            dest: &Path,
        ) -> Result<(), DownloadError> {
            tokio::fs::write(dest.join(self.filename), self.contents)
                .await
                .map_err(|err| DownloadError::FetchFailed(err.to_string()))
        }
    }

    /// Fails every fetch, remembering the working area it was handed.
    struct FailingExtractor {
        seen_dest: std::sync::Mutex<Option<PathBuf>>,
    }

    impl FailingExtractor {
        fn new() -> Self {
            Self {
                seen_dest: std::sync::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl MediaExtractor for FailingExtractor {
        fn name(&self) -> &'static str {
            "failing-stub"
        }

        async fn probe(
            &self,
            _url: &str,
        ) -> Result<crate::downloader::extractors::RawVideoInfo, DownloadError> {
            unreachable!("fetch tests never probe")
        }

        async fn fetch(
            &self,
            _url: &str,
            _format_id: &str,
            dest: &Path,
        ) -> Result<(), DownloadError> {
            *self.seen_dest.lock().unwrap() = Some(dest.to_path_buf());
            Err(DownloadError::FormatNotFound("999".to_string()))
        }
    }

    #[tokio::test]
    async fn returns_file_with_inferred_mime() {
        let stub = WritingExtractor {
            filename: "My Clip.mp4",
            contents: b"fake mp4 bytes",
        };

        let media = fetch_format(&stub, "https://youtu.be/dQw4w9WgXcQ", "22")
            .await
            .unwrap();
        assert_eq!(media.filename, "My Clip.mp4");
        assert_eq!(media.mime_type, "video/mp4");
        assert_eq!(media.bytes, b"fake mp4 bytes");
    }

    #[tokio::test]
    async fn extractor_failure_propagates_and_working_area_is_removed() {
        let stub = FailingExtractor::new();
        let err = fetch_format(&stub, "https://youtu.be/dQw4w9WgXcQ", "999")
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::FormatNotFound(_)));

        let dest = stub.seen_dest.lock().unwrap().clone().unwrap();
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn empty_working_area_is_file_missing() {
        struct NoopExtractor;

        #[async_trait]
        impl MediaExtractor for NoopExtractor {
            fn name(&self) -> &'static str {
                "noop-stub"
            }

            async fn probe(
                &self,
                _url: &str,
            ) -> Result<crate::downloader::extractors::RawVideoInfo, DownloadError> {
                unreachable!()
            }

            async fn fetch(
                &self,
                _url: &str,
                _format_id: &str,
                _dest: &Path,
            ) -> Result<(), DownloadError> {
                Ok(())
            }
        }

        let err = fetch_format(&NoopExtractor, "https://youtu.be/dQw4w9WgXcQ", "22")
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::FileMissing));
    }

    #[test]
    fn skips_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.mp4.part"), b"partial").unwrap();
        std::fs::write(dir.path().join("clip.mp4.ytdl"), b"state").unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"done").unwrap();

        let found = find_downloaded_file(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "clip.mp4");
    }

    #[test]
    fn mime_inference_table() {
        assert_eq!(mime_for_filename("a.mp4"), "video/mp4");
        assert_eq!(mime_for_filename("a.webm"), "video/webm");
        assert_eq!(mime_for_filename("a.mp3"), "audio/mp4");
        assert_eq!(mime_for_filename("a.m4a"), "audio/mp4");
        assert_eq!(mime_for_filename("a.mkv"), "application/octet-stream");
    }
}
