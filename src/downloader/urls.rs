// YouTube URL recognition and video id extraction

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use super::models::VideoReference;

lazy_static! {
    // Standard watch/embed/shorts forms on youtube.com and friends.
    static ref WATCH_RE: Regex = Regex::new(
        r"(?i)^((?:https?:)?//)?((?:www|m)\.)?(youtube\.com|youtu\.be|youtube-nocookie\.com)(/.*[?&]v=|/v/|/embed/|/shorts/|/watch\?v=|/watch\?.+&v=)([^#&?\s]{11})"
    )
    .unwrap();
    // Shortened youtu.be forms and a few youtube.com variants the primary
    // pattern is too strict for.
    static ref SHORT_RE: Regex = Regex::new(
        r"(?i)^(https?://)?(www\.)?(youtu\.be/|youtube\.com/(embed/|v/|watch\?v=|watch\?.+&v=))([\w-]{11})(\S*)$"
    )
    .unwrap();
    static ref ID_SCAN_RE: Regex = Regex::new(r"[0-9A-Za-z_-]{11}").unwrap();
}

/// Check whether the input matches one of the recognized YouTube URL
/// shapes. Extraction is only attempted on inputs that pass this check.
pub fn is_valid_youtube_url(url: &str) -> bool {
    WATCH_RE.is_match(url) || SHORT_RE.is_match(url)
}

/// Pull the 11-character video id out of an arbitrary YouTube URL.
///
/// Strategies, in order: youtu.be path suffix, `v` query parameter,
/// `/embed/` path segment, a last path segment of exactly 11 characters,
/// and finally a scan for any 11-character id-shaped token.
pub fn extract_video_id(raw: &str) -> Option<String> {
    if raw.contains("youtu.be") {
        if let Some(tail) = raw.rsplit('/').next() {
            let id = tail.split('?').next().unwrap_or(tail);
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    if let Some(parsed) = parse_lenient(raw) {
        let host = parsed.host_str().unwrap_or_default();
        if host.contains("youtube.com") {
            if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
                return Some(v.into_owned());
            }
            if parsed.path().contains("/embed/") {
                if let Some(seg) = last_path_segment(&parsed) {
                    return Some(seg);
                }
            }
        }

        if let Some(seg) = last_path_segment(&parsed) {
            if seg.len() == VideoReference::ID_LEN {
                return Some(seg);
            }
        }
    }

    ID_SCAN_RE.find(raw).map(|m| m.as_str().to_string())
}

/// Validate and extract in one step.
pub fn parse_video_reference(url: &str) -> Option<VideoReference> {
    if !is_valid_youtube_url(url) {
        return None;
    }
    extract_video_id(url).and_then(|id| VideoReference::new(&id))
}

fn parse_lenient(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .or_else(|_| Url::parse(&format!("https://{}", raw)))
        .ok()
}

fn last_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn recognizes_standard_watch_url() {
        assert!(is_valid_youtube_url(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        ));
        assert!(is_valid_youtube_url("http://m.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("youtube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn recognizes_alternate_shapes() {
        assert!(is_valid_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("https://www.youtube.com/v/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("https://www.youtube.com/shorts/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url(
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ"
        ));
    }

    #[test]
    fn rejects_non_youtube_input() {
        assert!(!is_valid_youtube_url("https://vimeo.com/123456"));
        assert!(!is_valid_youtube_url("not a url at all"));
        assert!(!is_valid_youtube_url(""));
        assert!(!is_valid_youtube_url("https://www.youtube.com/"));
    }

    #[test]
    fn all_shapes_extract_the_same_id() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=42",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
        ];
        for url in urls {
            assert_eq!(extract_video_id(url).as_deref(), Some(ID), "url: {url}");
        }
    }

    #[test]
    fn query_parameter_wins_over_path() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&feature=share")
                .as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn falls_back_to_token_scan() {
        // No `v` parameter and no 11-char path segment, so only the final
        // scan can find the id.
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?video=dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn reports_missing_id() {
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
    }

    #[test]
    fn parse_reference_round_trip() {
        let video = parse_video_reference("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(video.id(), ID);
        assert!(parse_video_reference("https://vimeo.com/123").is_none());
    }
}
