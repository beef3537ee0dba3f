use subtitles::{format_timestamp, SubtitleSource, TranscriptEntry};
use tracing::{debug, info};

use crate::{
    error::{Result, TranscriptError},
    params::{normalize_language, TimeWindow},
    request::TranscriptRequest,
    types::TranscriptResponse,
    video_id::resolve_video_id,
};

/// Resolve, validate, fetch, filter and render one transcript
pub async fn assemble<S>(source: &S, request: &TranscriptRequest) -> Result<TranscriptResponse>
where
    S: SubtitleSource + ?Sized,
{
    let video_id = resolve_video_id(&request.video_id)?;
    let window = TimeWindow::from_values(request.start_time.as_ref(), request.end_time.as_ref())?;
    let language = normalize_language(request.language_code.as_deref());

    info!("Assembling transcript for {} (language: {:?})", video_id, language);
    let fetched = source.fetch(&video_id, language).await?;
    if fetched.entries.is_empty() {
        return Err(TranscriptError::NoTranscriptContent);
    }

    let fetched_count = fetched.entries.len();
    let entries = window.filter(fetched.entries);
    if !window.is_unbounded() {
        debug!("Time window kept {} of {} entries", entries.len(), fetched_count);
    }

    let plain_text = render_plain_text(&entries, request.preserve_formatting);
    Ok(TranscriptResponse {
        video_id,
        language_code: fetched.language_code,
        language_name: fetched.language_name,
        is_generated: fetched.is_generated,
        total_duration: total_duration(&entries),
        word_count: word_count(&plain_text),
        plain_text,
        transcript: entries,
    })
}

/// Latest entry end, or 0 for an empty transcript
pub fn total_duration(entries: &[TranscriptEntry]) -> f64 {
    entries.iter().map(TranscriptEntry::end).fold(0.0, f64::max)
}

pub fn render_plain_text(entries: &[TranscriptEntry], preserve_formatting: bool) -> String {
    if preserve_formatting {
        entries
            .iter()
            .map(|entry| format!("[{}] {}", format_timestamp(entry.start), entry.text))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
