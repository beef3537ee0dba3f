use serde::Serialize;
use strum::{Display, IntoStaticStr};
use subtitles::SubtitleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Invalid YouTube video ID or URL: {0}")]
    InvalidVideoId(String),

    #[error("Invalid parameter: {0}")]
    Validation(String),

    #[error("No transcript content found")]
    NoTranscriptContent,

    #[error(transparent)]
    Subtitles(#[from] SubtitleError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Stable, machine-readable failure category reported to tool callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidVideoId,
    ValidationError,
    RateLimited,
    Timeout,
    NoSubtitlesAvailable,
    NoTranscriptContent,
    FormatError,
    AcquisitionFailed,
    ConfigError,
    IoError,
}

impl TranscriptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidVideoId(_) => ErrorKind::InvalidVideoId,
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::NoTranscriptContent => ErrorKind::NoTranscriptContent,
            Self::Subtitles(error) => match error {
                SubtitleError::Format(_) => ErrorKind::FormatError,
                SubtitleError::RateLimited(_) => ErrorKind::RateLimited,
                SubtitleError::Timeout { .. } => ErrorKind::Timeout,
                SubtitleError::NoSubtitlesAvailable | SubtitleError::NoSubtitlesForLanguage(_) => {
                    ErrorKind::NoSubtitlesAvailable
                }
                SubtitleError::AcquisitionFailed(_) | SubtitleError::Io(_) => {
                    ErrorKind::AcquisitionFailed
                }
            },
            Self::Config(_) | Self::TomlDe(_) => ErrorKind::ConfigError,
            Self::Io(_) => ErrorKind::IoError,
            Self::Json(_) => ErrorKind::FormatError,
        }
    }

    /// True when a later retry may succeed without changing the request
    pub fn is_transient(&self) -> bool {
        matches!(self.kind(), ErrorKind::RateLimited | ErrorKind::Timeout)
    }
}
