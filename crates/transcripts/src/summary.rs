use std::collections::HashMap;
use subtitles::{format_timestamp, SubtitleSource};
use tracing::info;

use crate::{
    assembler::{assemble, word_count},
    error::Result,
    params::validate_max_length,
    request::{SummaryRequest, TranscriptRequest},
    types::{
        ExcerptSample, SegmentStats, SpeechAnalysis, SummaryStatistics, TranscriptResponse,
        TranscriptSummary, WordFrequency,
    },
    video_id::resolve_video_id,
};

/// Matched as substrings of the lowercased text, so "like" also counts inside "likely"
pub const FILLER_WORDS: &[&str] = &[
    "um", "uh", "like", "you know", "i mean", "basically", "actually", "literally", "sort of",
    "kind of",
];

pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "him", "his", "how", "its", "may", "new", "now", "old", "see",
    "two", "who", "did", "get", "let", "say", "she", "too", "use", "that", "with", "have", "this",
    "will", "your", "from", "they", "know", "want", "been", "good", "much", "some", "time",
    "very", "when", "come", "here", "just", "like", "long", "make", "many", "more", "only",
    "over", "such", "take", "than", "them", "well", "were", "what", "there", "their", "would",
    "about", "which", "these", "those", "then", "into", "also", "because", "could", "should",
    "going", "really", "yeah", "okay",
];

const TOP_WORD_COUNT: usize = 5;
const READING_WORDS_PER_MINUTE: f64 = 200.0;

pub async fn summarize_transcript<S>(source: &S, request: &SummaryRequest) -> Result<TranscriptSummary>
where
    S: SubtitleSource + ?Sized,
{
    let video_id = resolve_video_id(&request.video_id)?;
    let max_length = validate_max_length(request.max_length)?;

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

    info!("Summarizing {} entries of {}", transcript.transcript.len(), transcript.video_id);
    Ok(summarize(&transcript, max_length))
}

pub fn summarize(transcript: &TranscriptResponse, max_length: usize) -> TranscriptSummary {
    let text = &transcript.plain_text;
    let lowered = text.to_lowercase();
    let total_words = transcript.word_count;
    let total_entries = transcript.transcript.len();

    let words_per_minute = if transcript.total_duration > 0.0 {
        total_words as f64 / (transcript.total_duration / 60.0)
    } else {
        0.0
    };

    let filler_word_count: usize = FILLER_WORDS
        .iter()
        .map(|filler| lowered.matches(filler).count())
        .sum();

    TranscriptSummary {
        video_id: transcript.video_id.clone(),
        language_code: transcript.language_code.clone(),
        language_name: transcript.language_name.clone(),
        is_generated: transcript.is_generated,
        statistics: SummaryStatistics {
            total_duration_seconds: transcript.total_duration,
            total_duration_formatted: format_timestamp(transcript.total_duration),
            total_words,
            total_entries,
            average_words_per_entry: round_to(ratio(total_words, total_entries), 2),
            words_per_minute: round_to(words_per_minute, 1),
            estimated_reading_time_minutes: round_to(
                total_words as f64 / READING_WORDS_PER_MINUTE,
                1,
            ),
        },
        speech_analysis: SpeechAnalysis {
            filler_word_count,
            filler_word_percentage: round_to(ratio(filler_word_count, total_words) * 100.0, 2),
            question_count: text.matches('?').count(),
            exclamation_count: text.matches('!').count(),
            pace: pace_label(words_per_minute).to_string(),
        },
        top_words: top_words(&lowered, TOP_WORD_COUNT),
        segment_stats: segment_stats(transcript),
        sample: excerpts(text, max_length),
        sample_text: leading_sample(text, max_length),
    }
}

pub fn pace_label(words_per_minute: f64) -> &'static str {
    if words_per_minute < 120.0 {
        "slow"
    } else if words_per_minute < 160.0 {
        "normal"
    } else if words_per_minute < 200.0 {
        "fast"
    } else {
        "very fast"
    }
}

/// Most frequent alphabetic words longer than two letters, ties broken by first appearance
pub fn top_words(lowered: &str, limit: usize) -> Vec<WordFrequency> {
    let mut counts: Vec<WordFrequency> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for word in lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| word.chars().count() > 2 && !STOP_WORDS.contains(word))
    {
        match positions.get(word) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(word, counts.len());
                counts.push(WordFrequency {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

fn segment_stats(transcript: &TranscriptResponse) -> SegmentStats {
    let lengths: Vec<usize> = transcript
        .transcript
        .iter()
        .map(|entry| word_count(&entry.text))
        .collect();

    SegmentStats {
        average_words: round_to(ratio(lengths.iter().sum(), lengths.len()), 2),
        min_words: lengths.iter().copied().min().unwrap_or(0),
        max_words: lengths.iter().copied().max().unwrap_or(0),
    }
}

/// Beginning, middle and end slices, each within a third of `max_length`
pub fn excerpts(text: &str, max_length: usize) -> ExcerptSample {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_length {
        return ExcerptSample {
            beginning: text.trim().to_string(),
            middle: String::new(),
            end: String::new(),
        };
    }

    let budget = (max_length / 3).max(1);
    let middle_start = skip_partial_word(&chars, (chars.len() - budget) / 2);
    let end_start = skip_partial_word(&chars, chars.len() - budget);

    ExcerptSample {
        beginning: format!("{}...", truncate_words(&chars, budget)),
        middle: format!("...{}...", truncate_words(&chars[middle_start..], budget)),
        end: format!(
            "...{}",
            chars[end_start..].iter().collect::<String>().trim()
        ),
    }
}

/// First `max_length` characters, with an ellipsis when the text was cut
pub fn leading_sample(text: &str, max_length: usize) -> String {
    let mut sample: String = text.chars().take(max_length).collect();
    if text.chars().count() > max_length {
        sample.push_str("...");
    }
    sample
}

fn truncate_words(chars: &[char], budget: usize) -> String {
    let slice = &chars[..budget.min(chars.len())];
    let cut = if slice.len() < chars.len() {
        slice
            .iter()
            .rposition(|c| c.is_whitespace())
            .filter(|&i| i > 0)
            .unwrap_or(slice.len())
    } else {
        slice.len()
    };
    slice[..cut].iter().collect::<String>().trim().to_string()
}

fn skip_partial_word(chars: &[char], start: usize) -> usize {
    if start == 0 || chars[start - 1].is_whitespace() {
        return start;
    }
    chars[start..]
        .iter()
        .position(|c| c.is_whitespace())
        .map(|offset| start + offset + 1)
        .unwrap_or(start)
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{render_plain_text, total_duration};
    use subtitles::TranscriptEntry;

    fn transcript(entries: Vec<TranscriptEntry>) -> TranscriptResponse {
        let plain_text = render_plain_text(&entries, false);
        TranscriptResponse {
            video_id: "jNQXAC9IVRw".into(),
            language_code: "en".into(),
            language_name: "English".into(),
            is_generated: false,
            total_duration: total_duration(&entries),
            word_count: word_count(&plain_text),
            plain_text,
            transcript: entries,
        }
    }

    #[test]
    fn test_statistics() {
        let summary = summarize(
            &transcript(vec![
                TranscriptEntry::new("Um so the elephants are here", 0.0, 10.0),
                TranscriptEntry::new("Elephants have long trunks!", 10.0, 10.0),
                TranscriptEntry::new("Is that cool?", 20.0, 10.0),
            ]),
            500,
        );

        let stats = &summary.statistics;
        assert_eq!(stats.total_words, 13);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.average_words_per_entry, 4.33);
        assert_eq!(stats.total_duration_formatted, "00:30");
        assert_eq!(stats.words_per_minute, 26.0);
        assert_eq!(stats.estimated_reading_time_minutes, 0.1);

        let speech = &summary.speech_analysis;
        assert_eq!(speech.question_count, 1);
        assert_eq!(speech.exclamation_count, 1);
        assert_eq!(speech.pace, "slow");

        assert_eq!(summary.segment_stats.min_words, 3);
        assert_eq!(summary.segment_stats.max_words, 6);
        assert_eq!(summary.top_words[0], WordFrequency { word: "elephants".into(), count: 2 });
    }

    #[test]
    fn test_fillers_count_as_substrings() {
        let summary = summarize(
            &transcript(vec![TranscriptEntry::new("I like it, likely, um, you know that", 0.0, 60.0)]),
            500,
        );
        // like x2, um x1, you know x1
        assert_eq!(summary.speech_analysis.filler_word_count, 4);
        assert_eq!(summary.speech_analysis.filler_word_percentage, 50.0);
    }

    #[test]
    fn test_zero_duration_has_zero_pace() {
        let summary = summarize(&transcript(vec![TranscriptEntry::new("instant", 0.0, 0.0)]), 500);
        assert_eq!(summary.statistics.words_per_minute, 0.0);
        assert_eq!(summary.speech_analysis.pace, "slow");
    }

    #[test]
    fn test_pace_labels() {
        assert_eq!(pace_label(119.9), "slow");
        assert_eq!(pace_label(120.0), "normal");
        assert_eq!(pace_label(160.0), "fast");
        assert_eq!(pace_label(200.0), "very fast");
    }

    #[test]
    fn test_top_words_skip_stop_words_and_short_words() {
        let top = top_words("the cat and the dog, the cat! an ox. zebra zebra cat", 5);
        let words: Vec<(&str, usize)> = top.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(words, vec![("cat", 3), ("zebra", 2), ("dog", 1)]);
    }

    #[test]
    fn test_excerpts_cut_at_word_boundaries() {
        let text = (1..=30).map(|i| format!("w{:02}", i)).collect::<Vec<_>>().join(" ");
        let sample = excerpts(&text, 60);
        assert_eq!(sample.beginning, "w01 w02 w03 w04 w05...");
        assert_eq!(sample.middle, "...w14 w15 w16 w17 w18...");
        assert_eq!(sample.end, "...w26 w27 w28 w29 w30");
    }

    #[test]
    fn test_short_text_is_not_split() {
        let sample = excerpts("just a little", 500);
        assert_eq!(sample.beginning, "just a little");
        assert!(sample.middle.is_empty() && sample.end.is_empty());
    }

    #[test]
    fn test_leading_sample() {
        assert_eq!(leading_sample("héllo world", 5), "héllo...");
        assert_eq!(leading_sample("hi", 5), "hi");
    }
}
