use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{Result, SubtitleError};

/// Pseudo-track yt-dlp reports for live streams; it holds chat replay, not captions
const LIVE_CHAT: &str = "live_chat";

/// One downloadable rendition of a track as reported by yt-dlp
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackFormat {
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A transcript available in one language
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub language_code: String,
    pub language_name: String,
    /// True when the track came from the automatic captions list
    pub is_generated: bool,
    pub formats: Vec<TrackFormat>,
}

impl Track {
    fn new(language_code: String, formats: Vec<TrackFormat>, is_generated: bool) -> Self {
        let language_name = formats
            .iter()
            .find_map(|format| format.name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| language_code.to_uppercase());

        Self {
            language_code,
            language_name,
            is_generated,
            formats,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideoInfo {
    #[serde(default)]
    subtitles: Option<Map<String, Value>>,
    #[serde(default)]
    automatic_captions: Option<Map<String, Value>>,
}

/// Manual and automatic tracks of one video, in the order yt-dlp listed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackCatalog {
    pub manual: Vec<Track>,
    pub automatic: Vec<Track>,
}

impl TrackCatalog {
    /// Build the catalog from `yt-dlp --dump-single-json` output
    pub fn from_info_json(content: &str) -> Result<Self> {
        let info: VideoInfo = serde_json::from_str(content).map_err(|e| {
            SubtitleError::AcquisitionFailed(format!("unreadable video metadata: {}", e))
        })?;

        let catalog = Self {
            manual: Self::tracks_from(info.subtitles, false),
            automatic: Self::tracks_from(info.automatic_captions, true),
        };
        debug!(
            "Track catalog: {} manual, {} automatic",
            catalog.manual.len(),
            catalog.automatic.len()
        );
        Ok(catalog)
    }

    fn tracks_from(map: Option<Map<String, Value>>, is_generated: bool) -> Vec<Track> {
        map.unwrap_or_default()
            .into_iter()
            .filter(|(code, _)| code != LIVE_CHAT)
            .map(|(code, formats)| {
                let formats: Vec<TrackFormat> = serde_json::from_value(formats).unwrap_or_default();
                Track::new(code, formats, is_generated)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.manual.is_empty() && self.automatic.is_empty()
    }

    pub fn find_manual(&self, language_code: &str) -> Option<&Track> {
        self.manual.iter().find(|t| t.language_code == language_code)
    }

    pub fn find_automatic(&self, language_code: &str) -> Option<&Track> {
        self.automatic.iter().find(|t| t.language_code == language_code)
    }

    fn find_preferred(&self, language_code: &str) -> Option<&Track> {
        self.find_manual(language_code)
            .or_else(|| self.find_automatic(language_code))
    }

    /// Pick the track to download.
    ///
    /// A requested language must be matched exactly, manual before automatic.
    /// Without a request the default language wins, then the first manual
    /// track, then the first automatic one.
    pub fn select(&self, requested: Option<&str>, default_language: &str) -> Result<&Track> {
        match requested {
            Some(code) => self
                .find_preferred(code)
                .ok_or_else(|| SubtitleError::NoSubtitlesForLanguage(code.to_string())),
            None => self
                .find_preferred(default_language)
                .or_else(|| self.manual.first())
                .or_else(|| self.automatic.first())
                .ok_or(SubtitleError::NoSubtitlesAvailable),
        }
    }
}
