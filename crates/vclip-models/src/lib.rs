//! Shared data models for the ViralClip clip planner.
//!
//! This crate provides Serde-serializable types for:
//! - Transcripts and caption cues
//! - Face-tracking samples and dominant speaker periods
//! - Highlight timestamps and their parsing
//! - Quality options and resolved encode profiles
//! - Subtitle styles, framing options and framing instructions
//! - Render plans

pub mod cue;
pub mod face;
pub mod framing;
pub mod highlight;
pub mod plan;
pub mod quality;
pub mod style;
pub mod subtitle;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use cue::{ClipWindow, Cue};
pub use face::{DominantPeriod, FaceAnalysis, FaceSample, SourceFrame, Speaker};
pub use framing::{ActiveWindow, FramingInstruction, FramingOp, InstructionKind};
pub use highlight::{Highlight, HighlightsResponse};
pub use plan::{BatchPlan, ClipFailure, ClipPlan, RenderPlan};
pub use quality::{
    BitrateOption, BitrateTarget, OutputResolution, QualityOptions, QualityProfile, QualityTier,
};
pub use style::{FramingOptions, VideoFormat, ZoomPolicy};
pub use subtitle::{SubtitleStyle, SubtitleStyleOverrides};
pub use timestamp::{parse_timestamp, TimestampError};
pub use transcript::{TranscriptPayload, TranscriptSegment, TranscriptSource, TranscriptWord};
