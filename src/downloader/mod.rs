// Extraction pipeline: URL handling, caching, format selection, download

pub mod cache;
pub mod errors;
pub mod extractors;
pub mod fetch;
pub mod format_selector;
pub mod models;
pub mod resolver;
pub mod urls;
pub mod utils;

pub use errors::DownloadError;
pub use models::{FormatDescriptor, MediaKind, VideoInfo, VideoReference};
