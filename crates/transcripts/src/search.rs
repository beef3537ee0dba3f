use regex::RegexBuilder;
use subtitles::{format_timestamp, SubtitleSource, TranscriptEntry};
use tracing::info;

use crate::{
    assembler::assemble,
    error::{Result, TranscriptError},
    params::{validate_context_window, validate_query},
    request::{SearchRequest, TranscriptRequest},
    types::{SearchResponse, SearchResult, TranscriptResponse},
    video_id::resolve_video_id,
};

/// Validate the request, fetch the whole transcript unformatted and search it
pub async fn search_transcript<S>(source: &S, request: &SearchRequest) -> Result<SearchResponse>
where
    S: SubtitleSource + ?Sized,
{
    let video_id = resolve_video_id(&request.video_id)?;
    validate_query(&request.query)?;
    let context_window = validate_context_window(request.context_window)?;

    let transcript = assemble(
        source,
        &TranscriptRequest {
            video_id,
            language_code: request.language_code.clone(),
            preserve_formatting: false,
            start_time: None,
            end_time: None,
        },
    )
    .await?;

    let response = search(&transcript, &request.query, request.case_sensitive, context_window)?;
    info!(
        "Found {} matches for {:?} in {}",
        response.total_matches, response.query, response.video_id
    );
    Ok(response)
}

pub fn search(
    transcript: &TranscriptResponse,
    query: &str,
    case_sensitive: bool,
    context_window: f64,
) -> Result<SearchResponse> {
    let results = search_entries(&transcript.transcript, query, case_sensitive, context_window)?;
    Ok(SearchResponse {
        video_id: transcript.video_id.clone(),
        query: query.to_string(),
        language_code: transcript.language_code.clone(),
        total_matches: results.len(),
        results,
    })
}

/// Find every non-overlapping literal occurrence of `query`, one result per occurrence
pub fn search_entries(
    entries: &[TranscriptEntry],
    query: &str,
    case_sensitive: bool,
    context_window: f64,
) -> Result<Vec<SearchResult>> {
    let pattern = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| TranscriptError::Validation(format!("unusable query: {}", e)))?;

    let mut results = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let mut matches = pattern.find_iter(&entry.text).peekable();
        if matches.peek().is_none() {
            continue;
        }

        let (context_before, context_after) = context_around(entries, index, context_window);
        for found in matches {
            results.push(SearchResult {
                match_text: found.as_str().to_string(),
                context_before: context_before.clone(),
                context_after: context_after.clone(),
                start_time: entry.start,
                end_time: entry.end(),
                timestamp_formatted: format_timestamp(entry.start),
            });
        }
    }

    Ok(results)
}

/// Contiguous neighbours of `entries[index]` within `context_window` seconds
fn context_around(entries: &[TranscriptEntry], index: usize, context_window: f64) -> (String, String) {
    let entry = &entries[index];
    let window_start = entry.start - context_window;
    let window_end = entry.end() + context_window;

    let mut before: Vec<&str> = entries[..index]
        .iter()
        .rev()
        .take_while(|previous| previous.end() >= window_start)
        .map(|previous| previous.text.as_str())
        .collect();
    before.reverse();

    let after: Vec<&str> = entries[index + 1..]
        .iter()
        .take_while(|next| next.start <= window_end)
        .map(|next| next.text.as_str())
        .collect();

    (before.join(" "), after.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<TranscriptEntry> {
        vec![
            TranscriptEntry::new("opening remarks", 0.0, 2.0),
            TranscriptEntry::new("The cat sat", 10.0, 2.0),
            TranscriptEntry::new("on the mat, the end", 13.0, 2.0),
            TranscriptEntry::new("much later", 100.0, 2.0),
        ]
    }

    #[test]
    fn test_case_insensitive_keeps_original_case() {
        let entries = vec![TranscriptEntry::new("The cat sat", 0.0, 1.0)];
        let results = search_entries(&entries, "the", false, 30.0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_text, "The");
    }

    #[test]
    fn test_case_sensitive() {
        let results = search_entries(&entries(), "The", true, 30.0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].start_time, 10.0);
    }

    #[test]
    fn test_every_occurrence_is_reported() {
        let results = search_entries(&entries(), "the", false, 30.0).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].start_time, 13.0);
        assert_eq!(results[2].start_time, 13.0);
        assert_eq!(results[2].end_time, 15.0);
        assert_eq!(results[2].timestamp_formatted, "00:13");
    }

    #[test]
    fn test_query_is_literal() {
        let entries = vec![TranscriptEntry::new("costs $5.00 (maybe)", 0.0, 1.0)];
        assert_eq!(search_entries(&entries, "$5.00 (", false, 0.0).unwrap().len(), 1);
        assert!(search_entries(&entries, "c.sts", false, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_context_is_bounded_by_window() {
        let results = search_entries(&entries(), "cat", false, 5.0).unwrap();
        assert_eq!(results.len(), 1);
        // opening remarks ends at 2.0, before 10 - 5
        assert_eq!(results[0].context_before, "");
        assert_eq!(results[0].context_after, "on the mat, the end");

        let results = search_entries(&entries(), "cat", false, 8.0).unwrap();
        assert_eq!(results[0].context_before, "opening remarks");
        assert_eq!(results[0].context_after, "on the mat, the end");
    }

    #[test]
    fn test_context_is_contiguous() {
        // The far entry is inside the window only by start time, but the
        // walk stops at the first entry outside it
        let entries = vec![
            TranscriptEntry::new("needle", 0.0, 1.0),
            TranscriptEntry::new("gap", 50.0, 1.0),
            TranscriptEntry::new("near", 5.0, 1.0),
        ];
        let results = search_entries(&entries, "needle", false, 10.0).unwrap();
        assert_eq!(results[0].context_after, "");
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(search_entries(&entries(), "dog", false, 30.0).unwrap().is_empty());
    }
}
