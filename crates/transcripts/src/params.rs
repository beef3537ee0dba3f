//! Coercion and validation of tool parameters.
//!
//! Callers send time bounds as numbers, numeric strings or null. Everything
//! is checked here, before any subtitle acquisition happens.

use serde_json::Value;
use subtitles::TranscriptEntry;

use crate::error::{Result, TranscriptError};

pub const MAX_QUERY_LENGTH: usize = 1000;
pub const MAX_CONTEXT_WINDOW: i64 = 300;

/// An optional time bound in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeBound {
    #[default]
    Absent,
    Seconds(f64),
}

impl TimeBound {
    /// Accepts null, a number or a numeric string; booleans, lists and objects are rejected
    pub fn from_value(name: &str, value: Option<&Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::Absent),
            Some(Value::Number(number)) => {
                let seconds = number
                    .as_f64()
                    .ok_or_else(|| invalid(name, &number.to_string()))?;
                Self::checked(name, seconds)
            }
            Some(Value::String(text)) => Self::parse(name, text),
            Some(Value::Bool(_)) => Err(wrong_type(name, "a boolean")),
            Some(Value::Array(_)) => Err(wrong_type(name, "a list")),
            Some(Value::Object(_)) => Err(wrong_type(name, "an object")),
        }
    }

    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let seconds = text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(name, text))?;
        Self::checked(name, seconds)
    }

    fn checked(name: &str, seconds: f64) -> Result<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid(name, &seconds.to_string()));
        }
        Ok(Self::Seconds(seconds))
    }

    pub fn seconds(self) -> Option<f64> {
        match self {
            Self::Absent => None,
            Self::Seconds(seconds) => Some(seconds),
        }
    }
}

impl From<Option<f64>> for TimeBound {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Absent, Self::Seconds)
    }
}

fn invalid(name: &str, raw: &str) -> TranscriptError {
    TranscriptError::Validation(format!(
        "{} must be a non-negative number of seconds, got {:?}",
        name, raw
    ))
}

fn wrong_type(name: &str, found: &str) -> TranscriptError {
    TranscriptError::Validation(format!(
        "{} must be a number or numeric string, got {}",
        name, found
    ))
}

/// Requested `[start, end]` slice of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeWindow {
    start: Option<f64>,
    end: Option<f64>,
}

impl TimeWindow {
    pub fn new(start: TimeBound, end: TimeBound) -> Result<Self> {
        let (start, end) = (start.seconds(), end.seconds());
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(TranscriptError::Validation(format!(
                    "end_time ({}) must not be before start_time ({})",
                    end, start
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn from_values(start: Option<&Value>, end: Option<&Value>) -> Result<Self> {
        Self::new(
            TimeBound::from_value("start_time", start)?,
            TimeBound::from_value("end_time", end)?,
        )
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// An entry is kept unless it ends before the window opens or starts after it closes
    pub fn overlaps(&self, entry: &TranscriptEntry) -> bool {
        let start = self.start.unwrap_or(0.0);
        let end = self.end.unwrap_or(f64::INFINITY);
        !(entry.end() < start || entry.start > end)
    }

    pub fn filter(&self, entries: Vec<TranscriptEntry>) -> Vec<TranscriptEntry> {
        if self.is_unbounded() {
            return entries;
        }
        entries.into_iter().filter(|entry| self.overlaps(entry)).collect()
    }
}

pub fn validate_query(query: &str) -> Result<()> {
    let length = query.chars().count();
    if length == 0 || length > MAX_QUERY_LENGTH {
        return Err(TranscriptError::Validation(format!(
            "query must be between 1 and {} characters, got {}",
            MAX_QUERY_LENGTH, length
        )));
    }
    Ok(())
}

pub fn validate_context_window(seconds: i64) -> Result<f64> {
    if !(0..=MAX_CONTEXT_WINDOW).contains(&seconds) {
        return Err(TranscriptError::Validation(format!(
            "context_window must be between 0 and {} seconds, got {}",
            MAX_CONTEXT_WINDOW, seconds
        )));
    }
    Ok(seconds as f64)
}

pub fn validate_max_length(max_length: i64) -> Result<usize> {
    usize::try_from(max_length)
        .ok()
        .filter(|length| *length > 0)
        .ok_or_else(|| {
            TranscriptError::Validation(format!("max_length must be positive, got {}", max_length))
        })
}

/// Blank language codes mean "no preference"
pub fn normalize_language(language_code: Option<&str>) -> Option<&str> {
    language_code.map(str::trim).filter(|code| !code.is_empty())
}
