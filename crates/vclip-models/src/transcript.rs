//! Transcript input models.
//!
//! Mirrors the shape of a speech-to-text `verbose_json` response: word-level
//! timings when word granularity was requested, segment-level timings
//! otherwise. Times are in seconds from the start of the source video.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single transcribed word with its timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptWord {
    /// The word text (may carry leading whitespace from the recognizer)
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl TranscriptWord {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }
}

/// A transcribed segment (sentence or phrase) with its timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Segment duration in seconds (may be zero or negative for bad input).
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Raw transcript payload.
///
/// Either list may be empty. Word timings win when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptPayload {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<TranscriptWord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<TranscriptSegment>,
}

/// Which granularity a transcript payload will be normalized from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptSource<'a> {
    Words(&'a [TranscriptWord]),
    Segments(&'a [TranscriptSegment]),
}

impl TranscriptPayload {
    pub fn from_words(words: Vec<TranscriptWord>) -> Self {
        Self {
            words,
            segments: Vec::new(),
        }
    }

    pub fn from_segments(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            words: Vec::new(),
            segments,
        }
    }

    pub fn source(&self) -> TranscriptSource<'_> {
        if self.words.is_empty() {
            TranscriptSource::Segments(&self.segments)
        } else {
            TranscriptSource::Words(&self.words)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.segments.is_empty()
    }
}
