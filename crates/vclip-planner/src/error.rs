//! Error types for planning operations.

use thiserror::Error;
use vclip_models::TimestampError;

/// Result type for planning operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors that can occur while planning a clip.
///
/// A missing face track is not an error (the plan falls back to a centred
/// crop), and an empty caption selection is only an error when the caller
/// asked for captions to be mandatory.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(#[from] TimestampError),

    #[error("Invalid clip window: {start}..{end}")]
    InvalidWindow { start: f64, end: f64 },

    #[error("No captions intersect window {start:.3}..{end:.3}")]
    EmptyWindowSelection { start: f64, end: f64 },

    #[error("SRT parse error at line {line}: {message}")]
    SrtParse { line: usize, message: String },

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl PlannerError {
    /// Create an SRT parse error.
    pub fn srt_parse(line: usize, message: impl Into<String>) -> Self {
        Self::SrtParse {
            line,
            message: message.into(),
        }
    }

    /// Whether this failure is specific to one clip (siblings can proceed).
    pub fn is_clip_scoped(&self) -> bool {
        matches!(
            self,
            PlannerError::MalformedTimestamp(_)
                | PlannerError::InvalidWindow { .. }
                | PlannerError::EmptyWindowSelection { .. }
        )
    }
}
