use clap::ValueEnum;
use serde::Serialize;
use strum::Display;
use subtitles::SubtitleExporter;
use thiserror::Error;
use transcripts::{CommandOutput, TranscriptResponse};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    SubtitleError(#[from] subtitles::SubtitleError),
    #[error("{format} output is only available for transcripts")]
    UnsupportedOutput { format: OutputFormat },
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty JSON, the same body the MCP tools return
    #[default]
    Json,
    /// Plain transcript text
    Text,
    /// WebVTT subtitle document
    Vtt,
    /// SubRip subtitle document
    Srt,
}

pub fn render(output: &CommandOutput, format: OutputFormat) -> Result<String, CliError> {
    match (output, format) {
        (_, OutputFormat::Json) => to_json(output),
        (CommandOutput::Transcript(transcript), format) => render_transcript(transcript, format),
        (_, format) => Err(CliError::UnsupportedOutput { format }),
    }
}

pub fn render_transcript(transcript: &TranscriptResponse, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => to_json(transcript)?,
        OutputFormat::Text => transcript.plain_text.clone(),
        OutputFormat::Vtt => SubtitleExporter::to_vtt(&transcript.transcript),
        OutputFormat::Srt => SubtitleExporter::to_srt(&transcript.transcript),
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcripts::TranscriptEntry;

    fn transcript() -> TranscriptResponse {
        TranscriptResponse {
            video_id: "jNQXAC9IVRw".into(),
            language_code: "en".into(),
            language_name: "English".into(),
            is_generated: false,
            transcript: vec![TranscriptEntry::new("Hello world", 1.0, 2.0)],
            plain_text: "[00:01] Hello world".into(),
            total_duration: 3.0,
            word_count: 3,
        }
    }

    #[test]
    fn test_transcript_formats() {
        let output = CommandOutput::Transcript(transcript());

        assert_eq!(render(&output, OutputFormat::Text).unwrap(), "[00:01] Hello world");
        assert_eq!(
            render(&output, OutputFormat::Srt).unwrap(),
            "1\n00:00:01,000 --> 00:00:03,000\nHello world\n\n"
        );
        assert!(render(&output, OutputFormat::Vtt).unwrap().starts_with("WEBVTT\n\n00:00:01.000 --> 00:00:03.000"));

        let json: serde_json::Value = serde_json::from_str(&render(&output, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["video_id"], "jNQXAC9IVRw");
    }

    #[test]
    fn test_subtitle_formats_need_a_transcript() {
        let output = CommandOutput::Languages(Vec::new());
        assert_eq!(render(&output, OutputFormat::Json).unwrap(), "[]");

        let error = render(&output, OutputFormat::Srt).unwrap_err();
        assert_eq!(error.to_string(), "srt output is only available for transcripts");
    }
}
