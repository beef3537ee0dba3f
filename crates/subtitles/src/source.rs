use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, TrackCatalog, TranscriptEntry};

/// Parsed subtitles for the track that was selected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchedSubtitles {
    pub entries: Vec<TranscriptEntry>,
    pub language_code: String,
    pub language_name: String,
    pub is_generated: bool,
}

/// Where subtitles come from.
///
/// The production implementation shells out to yt-dlp; tests substitute
/// canned data.
#[async_trait]
pub trait SubtitleSource: Send + Sync {
    /// List every track the video offers
    async fn list_tracks(&self, video_id: &str) -> Result<TrackCatalog>;

    /// Select a track (see [`TrackCatalog::select`]), download and parse it
    async fn fetch(&self, video_id: &str, language: Option<&str>) -> Result<FetchedSubtitles>;
}
