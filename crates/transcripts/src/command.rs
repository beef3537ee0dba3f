use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr, VariantNames};

use crate::{
    request::{LanguagesRequest, SearchRequest, SummaryRequest, TranscriptRequest},
    types::{LanguageInfo, SearchResponse, TranscriptResponse, TranscriptSummary},
};

/// Every operation the service exposes, addressable by name
#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TranscriptCommand {
    /// Fetch a transcript, optionally restricted to a time range
    GetTranscript(TranscriptRequest),
    /// Search a transcript for literal text
    SearchTranscript(SearchRequest),
    /// List the transcript languages a video offers
    GetAvailableLanguages(LanguagesRequest),
    /// Statistics and excerpts of a transcript
    GetTranscriptSummary(SummaryRequest),
}

impl TranscriptCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(TranscriptCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::GetTranscript(_) => "Fetch the transcript for a YouTube video, optionally filtered to a time range",
            Self::SearchTranscript(_) => "Search for text within a YouTube video transcript, with surrounding context",
            Self::GetAvailableLanguages(_) => "List the transcript languages available for a YouTube video",
            Self::GetTranscriptSummary(_) => "Summarize a transcript with statistics and sample excerpts",
        }
    }

    pub fn video_id(&self) -> &str {
        match self {
            Self::GetTranscript(request) => &request.video_id,
            Self::SearchTranscript(request) => &request.video_id,
            Self::GetAvailableLanguages(request) => &request.video_id,
            Self::GetTranscriptSummary(request) => &request.video_id,
        }
    }
}

/// Result of executing a [`TranscriptCommand`]
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CommandOutput {
    Transcript(TranscriptResponse),
    Search(SearchResponse),
    Languages(Vec<LanguageInfo>),
    Summary(TranscriptSummary),
}
