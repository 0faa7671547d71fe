// Extractor implementations for the external media tool

pub mod traits;
pub mod ytdlp;

pub use traits::{MediaExtractor, RawFormat, RawVideoInfo};
pub use ytdlp::YtDlpExtractor;
