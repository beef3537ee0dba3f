use strum::{Display, EnumString, IntoStaticStr};

use crate::{Json3Parser, Result, TranscriptEntry, VttParser};

pub trait SubtitleParser {
    fn parse(&self, input: &str) -> Result<Vec<TranscriptEntry>>;
}

/// Subtitle document formats we know how to read, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SubtitleFormat {
    Vtt,
    Json3,
}

impl SubtitleFormat {
    /// Value passed to `yt-dlp --sub-format`
    pub const PREFERENCE: &'static str = "vtt/json3/best";

    pub fn from_extension(extension: &str) -> Option<Self> {
        extension.to_ascii_lowercase().parse().ok()
    }

    pub fn parse(self, input: &str) -> Result<Vec<TranscriptEntry>> {
        match self {
            SubtitleFormat::Vtt => VttParser.parse(input),
            SubtitleFormat::Json3 => Json3Parser.parse(input),
        }
    }
}
