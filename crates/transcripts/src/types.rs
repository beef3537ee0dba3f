use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use subtitles::TranscriptEntry;

/// A transcript track a video offers
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LanguageInfo {
    pub language_code: String,
    pub language_name: String,
    /// Whether the track is auto-generated
    pub is_generated: bool,
    pub is_translatable: bool,
}

/// Full transcript of one video in one language
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TranscriptResponse {
    pub video_id: String,
    pub language_code: String,
    pub language_name: String,
    pub is_generated: bool,
    pub transcript: Vec<TranscriptEntry>,
    /// Rendered text, timestamp-annotated when formatting is preserved
    pub plain_text: String,
    /// End of the last entry, in seconds
    pub total_duration: f64,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SearchResult {
    /// Matched text in its original case
    pub match_text: String,
    pub context_before: String,
    pub context_after: String,
    /// Start of the entry containing the match, in seconds
    pub start_time: f64,
    /// End of the entry containing the match, in seconds
    pub end_time: f64,
    pub timestamp_formatted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SearchResponse {
    pub video_id: String,
    pub query: String,
    pub language_code: String,
    pub total_matches: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SummaryStatistics {
    pub total_duration_seconds: f64,
    pub total_duration_formatted: String,
    pub total_words: usize,
    pub total_entries: usize,
    pub average_words_per_entry: f64,
    pub words_per_minute: f64,
    pub estimated_reading_time_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SpeechAnalysis {
    pub filler_word_count: usize,
    pub filler_word_percentage: f64,
    pub question_count: usize,
    pub exclamation_count: usize,
    pub pace: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SegmentStats {
    pub average_words: f64,
    pub min_words: usize,
    pub max_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExcerptSample {
    pub beginning: String,
    pub middle: String,
    pub end: String,
}

/// Descriptive statistics and excerpts of a transcript
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TranscriptSummary {
    pub video_id: String,
    pub language_code: String,
    pub language_name: String,
    pub is_generated: bool,
    pub statistics: SummaryStatistics,
    pub speech_analysis: SpeechAnalysis,
    pub top_words: Vec<WordFrequency>,
    pub segment_stats: SegmentStats,
    pub sample: ExcerptSample,
    /// Leading slice of the transcript text, at most `max_length` characters plus an ellipsis
    pub sample_text: String,
}
