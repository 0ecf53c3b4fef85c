//! Timestamp parsing and validation utilities.
//!
//! Highlight timestamps come back from the "viral moments" model in loosely
//! SRT-shaped strings. This module accepts:
//! - `HH:MM:SS`, `MM:SS` or `SS`
//! - an optional sub-second part after `.` or `,` (`00:01:05,250`)
//! - `;` in place of `:` as the field separator (`00;01;05.250`)

use thiserror::Error;

/// Maximum reasonable video duration (24 hours in seconds).
pub const MAX_VIDEO_DURATION_SECS: f64 = 86400.0;

/// Parse a timestamp string to total seconds.
///
/// # Examples
/// ```
/// use vclip_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("01:30:00").unwrap(), 5400.0);
/// assert_eq!(parse_timestamp("01:02").unwrap(), 62.0);
/// assert!((parse_timestamp("00:01:05,250").unwrap() - 65.25).abs() < 1e-9);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let cleaned = ts.replace(',', ".").replace(';', ":");
    let parts: Vec<&str> = cleaned.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [s] => ("0", "0", *s),
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(TimestampError::InvalidFormat(ts.to_string())),
    };

    let hours = parse_component("hours", hours)?;
    let minutes = parse_component("minutes", minutes)?;
    let seconds = parse_component("seconds", seconds)?;

    if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
        return Err(TimestampError::Negative);
    }

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn parse_component(name: &'static str, raw: &str) -> Result<f64, TimestampError> {
    let raw = raw.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| TimestampError::InvalidValue(name, raw.to_string()))?;
    if !value.is_finite() {
        return Err(TimestampError::InvalidValue(name, raw.to_string()));
    }
    Ok(value)
}

/// Format seconds into HH:MM:SS or HH:MM:SS.mmm string.
pub fn format_seconds(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;

    if (secs - secs.floor()).abs() > 0.0001 {
        format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, mins, secs.floor() as u32)
    }
}

/// Format seconds as an SRT cue time (`HH:MM:SS,mmm`).
pub fn format_srt_time(total_secs: f64) -> String {
    let total_ms = (total_secs.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let mins = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis)
}

/// Validated timestamp pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTimestamps {
    /// Start time in seconds
    pub start_secs: f64,
    /// End time in seconds
    pub end_secs: f64,
}

impl ValidatedTimestamps {
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Validate a start/end timestamp pair.
///
/// Checks:
/// - Both timestamps parse
/// - Start is before end
/// - Neither exceeds the max video duration
/// - End doesn't exceed the video duration (if known, with a 1s buffer)
pub fn validate_timestamps(
    start: &str,
    end: &str,
    video_duration: Option<f64>,
) -> Result<ValidatedTimestamps, TimestampError> {
    let start_secs = parse_timestamp(start)?;
    let end_secs = parse_timestamp(end)?;

    if start_secs >= end_secs {
        return Err(TimestampError::StartNotBeforeEnd);
    }

    if start_secs > MAX_VIDEO_DURATION_SECS || end_secs > MAX_VIDEO_DURATION_SECS {
        return Err(TimestampError::ExceedsMaxDuration(MAX_VIDEO_DURATION_SECS));
    }

    if let Some(duration) = video_duration {
        if end_secs > duration + 1.0 {
            return Err(TimestampError::ExceedsVideoDuration {
                end_secs,
                video_duration: duration,
            });
        }
    }

    Ok(ValidatedTimestamps {
        start_secs,
        end_secs,
    })
}

/// Timestamp parsing/validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("Timestamp cannot be empty")]
    Empty,

    #[error("Timestamp cannot be negative")]
    Negative,

    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid timestamp format '{0}'. Use HH:MM:SS(,mmm) or MM:SS(,mmm)")]
    InvalidFormat(String),

    #[error("Start time must be before end time")]
    StartNotBeforeEnd,

    #[error("Timestamps exceed maximum allowed duration ({} hours)", .0 / 3600.0)]
    ExceedsMaxDuration(f64),

    #[error("End time ({end_secs:.1}s) exceeds video duration ({video_duration:.1}s)")]
    ExceedsVideoDuration { end_secs: f64, video_duration: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_hh_mm_ss() {
        assert_eq!(parse_timestamp("00:00:00").unwrap(), 0.0);
        assert_eq!(parse_timestamp("00:01:00").unwrap(), 60.0);
        assert_eq!(parse_timestamp("01:30:45").unwrap(), 5445.0);
    }

    #[test]
    fn test_parse_timestamp_mm_ss() {
        assert_eq!(parse_timestamp("01:02").unwrap(), 62.0);
        assert_eq!(parse_timestamp("53:53").unwrap(), 3233.0);
    }

    #[test]
    fn test_parse_timestamp_srt_comma() {
        let result = parse_timestamp("00:01:05,250").unwrap();
        assert!((result - 65.25).abs() < 1e-9);
    }

    #[test]
    fn test_parse_timestamp_semicolon_separators() {
        let result = parse_timestamp("00;00;30.5").unwrap();
        assert!((result - 30.5).abs() < 1e-9);
        assert_eq!(parse_timestamp("01;02").unwrap(), 62.0);
    }

    #[test]
    fn test_parse_timestamp_errors() {
        assert!(matches!(parse_timestamp(""), Err(TimestampError::Empty)));
        assert!(matches!(parse_timestamp("  "), Err(TimestampError::Empty)));
        assert!(matches!(parse_timestamp("abc"), Err(TimestampError::InvalidValue(_, _))));
        assert!(matches!(parse_timestamp("00:xx:10"), Err(TimestampError::InvalidValue("minutes", _))));
        assert!(matches!(parse_timestamp("1:2:3:4"), Err(TimestampError::InvalidFormat(_))));
        assert!(matches!(parse_timestamp("00:-1:00"), Err(TimestampError::Negative)));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "00:00:00");
        assert_eq!(format_seconds(90.0), "00:01:30");
        assert_eq!(format_seconds(3661.0), "01:01:01");
    }

    #[test]
    fn test_format_srt_time() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(65.25), "00:01:05,250");
        assert_eq!(format_srt_time(3723.5), "01:02:03,500");
    }

    #[test]
    fn test_validate_timestamps() {
        let result = validate_timestamps("00:00:10", "00:00:40", None).unwrap();
        assert_eq!(result.duration_secs(), 30.0);

        assert!(matches!(
            validate_timestamps("00:02:00", "00:01:00", None),
            Err(TimestampError::StartNotBeforeEnd)
        ));
        assert!(matches!(
            validate_timestamps("00:00:00", "00:05:00", Some(240.0)),
            Err(TimestampError::ExceedsVideoDuration { .. })
        ));
    }
}
