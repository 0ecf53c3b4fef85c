//! Caption cues and clip windows.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_srt_time;

/// A timed caption entry.
///
/// Inside a clip's cue track `start < end` always holds and cues are ordered
/// and non-overlapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Cue {
    /// 1-based position within its track
    pub index: u32,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn new(index: u32, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// SRT timing line (`00:00:01,000 --> 00:00:02,500`).
    pub fn srt_timing(&self) -> String {
        format!("{} --> {}", format_srt_time(self.start), format_srt_time(self.end))
    }
}

/// A `[start, end)` time window in source seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipWindow {
    pub start: f64,
    pub end: f64,
}

impl ClipWindow {
    /// Create a window, returning `None` unless `start < end` and both are finite.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if start.is_finite() && end.is_finite() && start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `t` lies in the closed range `[start, end]`.
    pub fn contains_inclusive(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}
