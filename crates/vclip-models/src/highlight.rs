//! Highlight (viral moment) models.
//!
//! Highlights come from the generative "find viral moments" step as
//! `{"clips": [{"start": "HH:MM:SS", "end": "HH:MM:SS", "reason": "..."}]}`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cue::ClipWindow;
use crate::timestamp::{validate_timestamps, TimestampError};

/// A highlight suggested for clipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Highlight {
    /// Start timestamp (HH:MM:SS[,mmm] or MM:SS[,mmm])
    pub start: String,

    /// End timestamp (HH:MM:SS[,mmm] or MM:SS[,mmm])
    pub end: String,

    /// Why this moment should perform well
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Highlight {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            reason: None,
            title: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Parse and validate the timestamps into a source window.
    pub fn window(&self, video_duration: Option<f64>) -> Result<ClipWindow, TimestampError> {
        let validated = validate_timestamps(&self.start, &self.end, video_duration)?;
        ClipWindow::new(validated.start_secs, validated.end_secs).ok_or(TimestampError::StartNotBeforeEnd)
    }
}

/// Response body of the highlight model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightsResponse {
    #[serde(default)]
    pub clips: Vec<Highlight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_window() {
        let window = Highlight::new("00:00:10", "00:00:40").window(None).unwrap();
        assert_eq!(window.start, 10.0);
        assert_eq!(window.end, 40.0);
    }

    #[test]
    fn test_highlight_window_srt_style() {
        let window = Highlight::new("00:01:05,250", "01:35").window(None).unwrap();
        assert!((window.start - 65.25).abs() < 1e-9);
        assert_eq!(window.end, 95.0);
    }

    #[test]
    fn test_highlight_window_malformed() {
        assert!(Highlight::new("soon", "00:00:40").window(None).is_err());
        assert!(matches!(
            Highlight::new("00:00:40", "00:00:10").window(None),
            Err(TimestampError::StartNotBeforeEnd)
        ));
    }

    #[test]
    fn test_deserialize_response() {
        let json = r#"{"clips":[{"start":"00:00:10","end":"00:00:40","reason":"hot take"}]}"#;
        let response: HighlightsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.clips.len(), 1);
        assert_eq!(response.clips[0].reason.as_deref(), Some("hot take"));
    }
}
