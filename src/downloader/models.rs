// Common data models shared by the resolver and the HTTP surface

use serde::{Deserialize, Serialize};

/// A validated 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    id: String,
}

impl VideoReference {
    pub const ID_LEN: usize = 11;

    /// Accepts exactly 11 characters of `[A-Za-z0-9_-]`; anything else
    /// is not a video id.
    pub fn new(id: &str) -> Option<Self> {
        if id.len() != Self::ID_LEN {
            return None;
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return None;
        }
        Some(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical watch URL used for extraction and as the cache key input.
    pub fn canonical_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// Whether a format carries video (with audio muxed in) or audio only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

/// One downloadable format as presented to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDescriptor {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub quality: String,
    pub mime_type: String,
    pub itag: String,
    pub filesize_mb: Option<f64>,
    pub format_id: String,
    pub ext: String,
}

/// Resolved metadata for a single video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub thumbnail: String,
    pub formats: Vec<FormatDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_accepts_valid_id() {
        let video = VideoReference::new("dQw4w9WgXcQ").unwrap();
        assert_eq!(video.id(), "dQw4w9WgXcQ");
        assert_eq!(
            video.canonical_url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn reference_rejects_wrong_length() {
        assert!(VideoReference::new("short").is_none());
        assert!(VideoReference::new("dQw4w9WgXcQQ").is_none());
    }

    #[test]
    fn reference_rejects_bad_charset() {
        assert!(VideoReference::new("dQw4w9WgXc!").is_none());
        assert!(VideoReference::new("dQw4w9 gXcQ").is_none());
    }

    #[test]
    fn format_kind_serializes_lowercase() {
        let kind = serde_json::to_string(&MediaKind::Audio).unwrap();
        assert_eq!(kind, "\"audio\"");
    }
}
