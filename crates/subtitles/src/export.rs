use crate::{format_cue_timestamp, Result, SubtitleError, TranscriptEntry};

/// Export transcript entries to subtitle documents
pub struct SubtitleExporter;

impl SubtitleExporter {
    /// Export to SRT format
    pub fn to_srt(entries: &[TranscriptEntry]) -> String {
        let mut output = String::new();

        for (i, entry) in entries.iter().enumerate() {
            output.push_str(&format!("{}\n", i + 1));
            output.push_str(&format!(
                "{} --> {}\n",
                Self::format_timestamp_srt(entry.start),
                Self::format_timestamp_srt(entry.end())
            ));
            output.push_str(&format!("{}\n\n", entry.text));
        }

        output
    }

    /// Export to VTT format
    pub fn to_vtt(entries: &[TranscriptEntry]) -> String {
        let mut output = String::from("WEBVTT\n\n");

        for entry in entries {
            output.push_str(&format!(
                "{} --> {}\n",
                format_cue_timestamp(entry.start),
                format_cue_timestamp(entry.end())
            ));
            output.push_str(&format!("{}\n\n", entry.text));
        }

        output
    }

    /// Export to JSON format
    pub fn to_json(entries: &[TranscriptEntry]) -> Result<String> {
        serde_json::to_string_pretty(entries)
            .map_err(|e| SubtitleError::Format(format!("Failed to serialize entries: {}", e)))
    }

    fn format_timestamp_srt(seconds: f64) -> String {
        format_cue_timestamp(seconds).replacen('.', ",", 1)
    }
}
