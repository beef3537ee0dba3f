use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Result, TranscriptError};

fn video_id_regex() -> &'static Regex {
    static VIDEO_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    VIDEO_ID_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Failed to compile video id regex"))
}

fn url_regexes() -> &'static [Regex] {
    static URL_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    URL_REGEXES.get_or_init(|| {
        [
            r"(?:youtube\.com/(?:watch\?v=|embed/|shorts/|live/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})",
            r"youtube\.com/watch\?.*?v=([A-Za-z0-9_-]{11})",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Failed to compile video URL regex"))
        .collect()
    })
}

pub fn is_valid_video_id(candidate: &str) -> bool {
    video_id_regex().is_match(candidate)
}

/// Accept a bare 11-character id or pull it out of a watch, short or embed link
pub fn resolve_video_id(input: &str) -> Result<String> {
    let input = input.trim();
    if is_valid_video_id(input) {
        return Ok(input.to_string());
    }

    url_regexes()
        .iter()
        .find_map(|regex| regex.captures(input))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| TranscriptError::InvalidVideoId(input.to_string()))
}
