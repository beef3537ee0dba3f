use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::{parse_timestamp, Result, SubtitleParser, TranscriptEntry};

const CUE_SEPARATOR: &str = "-->";

fn markup_tag_regex() -> &'static Regex {
    static MARKUP_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Failed to compile markup tag regex"))
}

/// Parser for WebVTT cue documents.
///
/// Tolerant by line: anything that is neither a cue header nor cue text
/// (cue identifiers, stray junk) is skipped, and a cue whose header does not
/// decode is dropped together with its text.
pub struct VttParser;

impl SubtitleParser for VttParser {
    fn parse(&self, input: &str) -> Result<Vec<TranscriptEntry>> {
        let lines: Vec<&str> = input.lines().collect();
        let mut entries = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim().trim_start_matches('\u{FEFF}');
            i += 1;

            if line.is_empty() || is_header_line(line) || !line.contains(CUE_SEPARATOR) {
                continue;
            }

            let mut text_lines = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                let stripped = markup_tag_regex().replace_all(lines[i].trim(), "");
                let stripped = stripped.trim();
                if !stripped.is_empty() {
                    text_lines.push(stripped.to_string());
                }
                i += 1;
            }

            let Some((start, end)) = parse_cue_header(line) else {
                warn!("Skipping cue with unreadable timing: {}", line);
                continue;
            };

            if !text_lines.is_empty() {
                entries.push(TranscriptEntry::new(text_lines.join(" "), start, end - start));
            }
        }

        Ok(entries)
    }
}

fn is_header_line(line: &str) -> bool {
    ["WEBVTT", "NOTE", "STYLE", "REGION"]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

fn parse_cue_header(line: &str) -> Option<(f64, f64)> {
    let (start, end) = line.split_once(CUE_SEPARATOR)?;
    let start = parse_timestamp(start).ok()?;
    let end = parse_timestamp(end).ok()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_two_cues() {
        let doc = "00:00:01.000 --> 00:00:03.000\nHello world\n\n00:00:04.000 --> 00:00:05.500\nSecond line";
        let entries = VttParser.parse(doc).unwrap();
        assert_eq!(
            entries,
            vec![
                TranscriptEntry::new("Hello world", 1.0, 2.0),
                TranscriptEntry::new("Second line", 4.0, 1.5),
            ]
        );
    }

    #[test]
    fn test_skips_headers_notes_and_identifiers() {
        let doc = "\u{FEFF}WEBVTT\nKind: captions\nLanguage: en\n\nNOTE produced by hand\n\n1\n00:01.000 --> 00:02.000\nFirst\n\n2\n00:02.000 --> 00:03.000\nSecond\n";
        let entries = VttParser.parse(doc).unwrap();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second"]);
    }

    #[test]
    fn test_strips_markup_and_joins_lines() {
        let doc = "WEBVTT\n\n00:00:00.000 --> 00:00:02.000 align:start position:0%\n<c.colorE5E5E5>so</c><00:00:00.500><c> today</c>\nwe <b>begin</b>\n";
        let entries = VttParser.parse(doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "so today we begin");
        assert_eq!(entries[0].duration, 2.0);
    }

    #[test]
    fn test_cue_without_text_is_dropped() {
        let doc = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n<c></c>\n\n00:00:01.000 --> 00:00:02.000\nkept\n";
        let entries = VttParser.parse(doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "kept");
    }

    #[test]
    fn test_bad_cue_timing_is_skipped() {
        let doc = "WEBVTT\n\nxx:yy --> 00:00:02.000\nlost\n\n00:00:03.000 --> 00:00:04.000\nfound\n";
        let entries = VttParser.parse(doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "found");
    }

    #[test]
    fn test_overflowing_cue_timing_is_skipped() {
        let doc = "WEBVTT\n\n99999999999999999:00:00.000 --> 99999999999999999:00:01.000\nbad\n\n00:00:03.000 --> 00:00:04.000\nfound\n";
        let entries = VttParser.parse(doc).unwrap();
        assert_eq!(entries, vec![TranscriptEntry::new("found", 3.0, 1.0)]);
    }

    #[test]
    fn test_inverted_cue_has_zero_duration() {
        let doc = "00:00:05.000 --> 00:00:04.000\nbackwards";
        let entries = VttParser.parse(doc).unwrap();
        assert_eq!(entries[0].duration, 0.0);
        assert!(entries.iter().all(|e| e.duration >= 0.0));
    }
}
