//! Tool requests as callers send them.
//!
//! Values are validated when the request is executed, not when it is
//! deserialized, so every caller gets the same structured errors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_true() -> bool {
    true
}

fn default_context_window() -> i64 {
    30
}

fn default_max_length() -> i64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TranscriptRequest {
    #[schemars(description = "YouTube video ID (11 characters) or URL")]
    pub video_id: String,
    #[schemars(description = "Language code (e.g. 'en', 'es'). Best available track when omitted")]
    #[serde(default)]
    pub language_code: Option<String>,
    #[schemars(description = "Prefix each line of plain_text with its [MM:SS] timestamp")]
    #[serde(default = "default_true")]
    pub preserve_formatting: bool,
    #[schemars(description = "Only keep entries overlapping this start time, in seconds (number or numeric string)")]
    #[serde(default)]
    pub start_time: Option<Value>,
    #[schemars(description = "Only keep entries overlapping this end time, in seconds (number or numeric string)")]
    #[serde(default)]
    pub end_time: Option<Value>,
}

impl TranscriptRequest {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            language_code: None,
            preserve_formatting: true,
            start_time: None,
            end_time: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SearchRequest {
    #[schemars(description = "YouTube video ID (11 characters) or URL")]
    pub video_id: String,
    #[schemars(description = "Text to search for, matched literally", length(min = 1, max = 1000))]
    pub query: String,
    #[schemars(description = "Language code of the transcript to search")]
    #[serde(default)]
    pub language_code: Option<String>,
    #[schemars(description = "Whether the search is case sensitive")]
    #[serde(default)]
    pub case_sensitive: bool,
    #[schemars(description = "Seconds of context to include before and after each match", range(min = 0, max = 300))]
    #[serde(default = "default_context_window")]
    pub context_window: i64,
}

impl SearchRequest {
    pub fn new(video_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            query: query.into(),
            language_code: None,
            case_sensitive: false,
            context_window: default_context_window(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LanguagesRequest {
    #[schemars(description = "YouTube video ID (11 characters) or URL")]
    pub video_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SummaryRequest {
    #[schemars(description = "YouTube video ID (11 characters) or URL")]
    pub video_id: String,
    #[schemars(description = "Language code of the transcript to summarize")]
    #[serde(default)]
    pub language_code: Option<String>,
    #[schemars(description = "Maximum length of the sample text, in characters")]
    #[serde(default = "default_max_length")]
    pub max_length: i64,
}

impl SummaryRequest {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            language_code: None,
            max_length: default_max_length(),
        }
    }
}
