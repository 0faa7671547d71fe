// Format selection: progressive filtering, dedup, priority ordering
//
// Converts the raw yt-dlp format list into the client-facing list:
// progressive mp4 streams deduplicated per resolution label and sorted
// by a fixed priority, with the best audio-only stream appended last.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::extractors::RawFormat;
use super::models::{FormatDescriptor, MediaKind};

/// Recognized resolution labels, best first.
pub const QUALITY_PRIORITIES: [&str; 5] = ["1080p", "720p", "480p", "360p", "240p"];

// Anything not in the priority list sorts after everything that is.
const UNRECOGNIZED_RANK: usize = 99;

const PROGRESSIVE_EXT: &str = "mp4";
const AUDIO_EXTS: [&str; 2] = ["mp4", "m4a"];

/// Rank of a quality label in the fixed priority order.
pub fn priority_rank(quality: &str) -> usize {
    QUALITY_PRIORITIES
        .iter()
        .position(|q| *q == quality)
        .unwrap_or(UNRECOGNIZED_RANK)
}

/// Build the ordered descriptor list from a raw probe result.
pub fn select_formats(raw: &[RawFormat]) -> Vec<FormatDescriptor> {
    let mut formats = Vec::new();
    let mut seen = HashSet::new();

    for fmt in raw {
        if !fmt.has_video() || !fmt.has_audio() {
            continue;
        }
        if fmt.ext.as_deref() != Some(PROGRESSIVE_EXT) {
            continue;
        }
        let (Some(height), Some(format_id)) = (fmt.height, fmt.format_id.as_deref()) else {
            continue;
        };

        let quality = format!("{}p", height);
        if !QUALITY_PRIORITIES.contains(&quality.as_str()) || seen.contains(&quality) {
            continue;
        }
        seen.insert(quality.clone());

        formats.push(FormatDescriptor {
            kind: MediaKind::Video,
            quality,
            mime_type: "video/mp4".to_string(),
            itag: format_id.to_string(),
            filesize_mb: size_in_mb(fmt.effective_size()),
            format_id: format_id.to_string(),
            ext: PROGRESSIVE_EXT.to_string(),
        });
    }

    formats.sort_by_key(|f| priority_rank(&f.quality));

    if let Some(audio) = best_audio(raw) {
        formats.push(audio);
    }

    formats
}

/// Highest-bitrate audio-only stream of a compatible container.
fn best_audio(raw: &[RawFormat]) -> Option<FormatDescriptor> {
    raw.iter()
        .filter(|fmt| {
            !fmt.has_video()
                && fmt.has_audio()
                && fmt
                    .ext
                    .as_deref()
                    .map_or(false, |ext| AUDIO_EXTS.contains(&ext))
                && fmt.format_id.is_some()
        })
        .max_by(|a, b| {
            a.abr
                .unwrap_or(0.0)
                .partial_cmp(&b.abr.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        })
        .map(|fmt| {
            let format_id = fmt.format_id.clone().unwrap_or_default();
            let quality = match fmt.abr {
                Some(abr) if abr > 0.0 => format!("MP3 {}kbps", abr as u32),
                _ => "MP3".to_string(),
            };
            FormatDescriptor {
                kind: MediaKind::Audio,
                quality,
                mime_type: "audio/mp4".to_string(),
                itag: format_id.clone(),
                filesize_mb: size_in_mb(fmt.effective_size()),
                format_id,
                ext: "mp4".to_string(),
            }
        })
}

fn size_in_mb(bytes: Option<f64>) -> Option<f64> {
    match bytes {
        Some(b) if b > 0.0 => Some((b / 1_048_576.0 * 10.0).round() / 10.0),
        _ => None,
    }
}
