use serde::Deserialize;

use crate::{Result, SubtitleError, SubtitleParser, TranscriptEntry};

#[derive(Debug, Deserialize)]
struct Json3Document {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: f64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: Option<f64>,
    #[serde(default)]
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Parser for YouTube's `json3` timed-text event stream
pub struct Json3Parser;

impl SubtitleParser for Json3Parser {
    fn parse(&self, input: &str) -> Result<Vec<TranscriptEntry>> {
        let document: Json3Document = serde_json::from_str(input)
            .map_err(|e| SubtitleError::Format(format!("invalid json3 document: {}", e)))?;

        let entries = document
            .events
            .into_iter()
            .filter_map(|event| {
                // Segments carry their own leading spaces, so they are glued as-is
                let raw: String = event
                    .segs
                    .unwrap_or_default()
                    .into_iter()
                    .map(|seg| seg.utf8)
                    .collect();
                let text = raw.replace('\n', " ").trim().to_string();
                if text.is_empty() {
                    return None;
                }

                let duration = event
                    .duration_ms
                    .filter(|ms| *ms > 0.0)
                    .map(|ms| ms / 1000.0)
                    .unwrap_or(0.0);

                Some(TranscriptEntry::new(text, event.start_ms / 1000.0, duration))
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_events() {
        let doc = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 5000, "id": 1, "wpWinPosId": 1},
                {"tStartMs": 1200, "dDurationMs": 2300, "segs": [{"utf8": "hello"}, {"utf8": " world", "tOffsetMs": 400}]},
                {"tStartMs": 3500, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 4000, "dDurationMs": 1000, "segs": [{"utf8": "again"}]}
            ]
        }"#;
        let entries = Json3Parser.parse(doc).unwrap();
        assert_eq!(
            entries,
            vec![
                TranscriptEntry::new("hello world", 1.2, 2.3),
                TranscriptEntry::new("again", 4.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_segments_keep_their_inner_spacing() {
        let doc = r#"{"events": [{"tStartMs": 0, "segs": [{"utf8": " a  b\n"}, {"utf8": "c "}]}]}"#;
        let entries = Json3Parser.parse(doc).unwrap();
        assert_eq!(entries[0].text, "a  b c");
    }

    #[test]
    fn test_missing_or_negative_duration_is_zero() {
        let doc = r#"{"events": [
            {"tStartMs": 1000, "segs": [{"utf8": "no duration"}]},
            {"tStartMs": 2000, "dDurationMs": -300, "segs": [{"utf8": "negative"}]}
        ]}"#;
        let entries = Json3Parser.parse(doc).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.duration == 0.0));
    }

    #[test]
    fn test_document_without_events_is_empty() {
        assert!(Json3Parser.parse("{}").unwrap().is_empty());
    }

    #[test]
    fn test_unrecognizable_document_fails() {
        assert!(matches!(Json3Parser.parse("WEBVTT"), Err(SubtitleError::Format(_))));
        assert!(matches!(
            Json3Parser.parse(r#"{"events": "nope"}"#),
            Err(SubtitleError::Format(_))
        ));
    }
}
