//! Conversion between cue timestamps and seconds.

use crate::{Result, SubtitleError};

/// Parse `H:MM:SS[.mmm]`, `MM:SS[.mmm]` or a bare number of seconds.
///
/// Cue settings following the timestamp (`00:01.000 align:start position:0%`)
/// are ignored. The fraction is read as milliseconds: `.5` is 500ms and digits
/// beyond the third are dropped.
pub fn parse_timestamp(text: &str) -> Result<f64> {
    let raw = text.split_whitespace().next().unwrap_or_default();
    let raw = raw.replace(',', ".");

    let (clock, fraction) = match raw.split_once('.') {
        Some((clock, fraction)) => (clock, fraction),
        None => (raw.as_str(), ""),
    };

    let millis = parse_millis(fraction).ok_or_else(|| invalid(text))?;

    let components = clock
        .split(':')
        .map(|part| part.parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| invalid(text))?;

    let whole_seconds = match components.as_slice() {
        [hours, minutes, seconds] => clock_seconds(&[*hours, *minutes, *seconds]),
        [minutes, seconds] => clock_seconds(&[*minutes, *seconds]),
        [seconds] => Some(*seconds),
        _ => None,
    }
    .ok_or_else(|| invalid(text))?;

    Ok(whole_seconds as f64 + millis as f64 / 1000.0)
}

/// Fold `[.., minutes, seconds]` into seconds, `None` on overflow
fn clock_seconds(components: &[u64]) -> Option<u64> {
    components
        .iter()
        .try_fold(0u64, |total, part| total.checked_mul(60)?.checked_add(*part))
}

fn parse_millis(fraction: &str) -> Option<u32> {
    if fraction.is_empty() {
        return Some(0);
    }
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits: String = fraction.chars().chain("000".chars()).take(3).collect();
    digits.parse().ok()
}

fn invalid(text: &str) -> SubtitleError {
    SubtitleError::Format(format!("invalid timestamp: {:?}", text))
}

/// Render seconds as `MM:SS`, or `HH:MM:SS` once past the first hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let hours = (total / 3600.0) as u64;
    let minutes = ((total % 3600.0) / 60.0) as u64;
    let secs = (total % 60.0) as u64;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Render seconds as a full WebVTT cue timestamp (`HH:MM:SS.mmm`).
pub fn format_cue_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_seconds = total_ms / 1000;
    let secs = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let mins = total_minutes % 60;
    let hours = total_minutes / 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
}
