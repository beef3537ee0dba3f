//! Subtitle acquisition and parsing for YouTube transcripts.
//!
//! Raw subtitle documents come from `yt-dlp` (see [`YtDlpSource`]) in one of two
//! formats, WebVTT cue documents or YouTube's `json3` event stream. Both are
//! parsed into the same ordered list of [`TranscriptEntry`] values.

pub mod export;
pub mod json3;
pub mod parser;
pub mod source;
pub mod timestamp;
pub mod tracks;
pub mod vtt;
pub mod ytdlp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use export::SubtitleExporter;
pub use json3::Json3Parser;
pub use parser::{SubtitleFormat, SubtitleParser};
pub use source::{FetchedSubtitles, SubtitleSource};
pub use timestamp::{format_cue_timestamp, format_timestamp, parse_timestamp};
pub use tracks::{Track, TrackCatalog, TrackFormat};
pub use vtt::VttParser;
pub use ytdlp::YtDlpSource;

#[derive(Error, Debug)]
pub enum SubtitleError {
    #[error("Subtitle format error: {0}")]
    Format(String),
    #[error("Rate limited by YouTube: {0}")]
    RateLimited(String),
    #[error("Subtitle acquisition timed out after {millis}ms")]
    Timeout { millis: u64 },
    #[error("No subtitles available for this video")]
    NoSubtitlesAvailable,
    #[error("No subtitles found for language: {0}")]
    NoSubtitlesForLanguage(String),
    #[error("Subtitle acquisition failed: {0}")]
    AcquisitionFailed(String),
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SubtitleError>;

/// One timed caption unit, independent of the document format it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct TranscriptEntry {
    /// Caption text with markup removed
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl TranscriptEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start: start.max(0.0),
            duration: duration.max(0.0),
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_end() {
        let entry = TranscriptEntry::new("Hello, world!", 1.5, 2.0);
        assert_eq!(entry.end(), 3.5);
        assert_eq!(entry.text, "Hello, world!");
    }

    #[test]
    fn test_entry_clamps_negative_timing() {
        let entry = TranscriptEntry::new("late", -1.0, -4.0);
        assert_eq!(entry.start, 0.0);
        assert_eq!(entry.duration, 0.0);
    }
}
