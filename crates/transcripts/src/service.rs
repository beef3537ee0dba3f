use std::sync::Arc;
use subtitles::SubtitleSource;

use crate::{
    assembler::assemble,
    command::{CommandOutput, TranscriptCommand},
    config::TranscriptConfig,
    error::Result,
    languages::available_languages,
    request::{LanguagesRequest, SearchRequest, SummaryRequest, TranscriptRequest},
    search::search_transcript,
    summary::summarize_transcript,
    types::{LanguageInfo, SearchResponse, TranscriptResponse, TranscriptSummary},
};

/// Dispatches tool operations to a subtitle source.
///
/// Built once at startup and cloned into each transport; holds no state
/// between calls.
#[derive(Clone)]
pub struct TranscriptService {
    source: Arc<dyn SubtitleSource>,
}

impl TranscriptService {
    pub fn new(source: Arc<dyn SubtitleSource>) -> Self {
        Self { source }
    }

    /// Service backed by yt-dlp, configured from `config`
    pub fn from_config(config: &TranscriptConfig) -> Self {
        Self::new(Arc::new(config.source()))
    }

    pub async fn get_transcript(&self, request: &TranscriptRequest) -> Result<TranscriptResponse> {
        assemble(self.source.as_ref(), request).await
    }

    pub async fn search_transcript(&self, request: &SearchRequest) -> Result<SearchResponse> {
        search_transcript(self.source.as_ref(), request).await
    }

    pub async fn get_available_languages(&self, request: &LanguagesRequest) -> Result<Vec<LanguageInfo>> {
        available_languages(self.source.as_ref(), &request.video_id).await
    }

    pub async fn get_transcript_summary(&self, request: &SummaryRequest) -> Result<TranscriptSummary> {
        summarize_transcript(self.source.as_ref(), request).await
    }

    pub async fn execute(&self, command: &TranscriptCommand) -> Result<CommandOutput> {
        let output = match command {
            TranscriptCommand::GetTranscript(request) => {
                CommandOutput::Transcript(self.get_transcript(request).await?)
            }
            TranscriptCommand::SearchTranscript(request) => {
                CommandOutput::Search(self.search_transcript(request).await?)
            }
            TranscriptCommand::GetAvailableLanguages(request) => {
                CommandOutput::Languages(self.get_available_languages(request).await?)
            }
            TranscriptCommand::GetTranscriptSummary(request) => {
                CommandOutput::Summary(self.get_transcript_summary(request).await?)
            }
        };
        Ok(output)
    }
}
