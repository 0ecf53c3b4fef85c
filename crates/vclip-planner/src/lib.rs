#![deny(unreachable_patterns)]
//! Deterministic clip timeline and framing planner.
//!
//! This crate provides:
//! - Transcript normalization into caption cues
//! - Per-clip cue extraction and re-basing
//! - Speaker activity segmentation from face-tracking samples
//! - Framing plan construction (crops, zoom, enhancement, subtitles)
//! - Quality profile and subtitle style resolution
//! - Batch planning with per-clip failure isolation
//! - FFmpeg filter and SRT rendering of plans

pub mod error;
pub mod filters;
pub mod framing;
pub mod normalizer;
pub mod planner;
pub mod quality;
pub mod segmenter;
pub mod srt;
pub mod subtitle_style;
pub mod window;

pub use error::{PlannerError, PlannerResult};
pub use filters::{build_filter_chain, instruction_filter};
pub use framing::{build_render_plan, FramingContext, PortraitCrop};
pub use normalizer::{normalize, normalize_segments, normalize_words, NormalizerConfig};
pub use planner::{ClipPlanner, PlannerConfig, PlanningInputs};
pub use quality::{bitrate_kbps, resolve_quality};
pub use segmenter::{fold_periods, segment_speakers, SegmenterConfig, SpeakerActivity, SpeakerTrack};
pub use srt::{format_srt, parse_srt};
pub use subtitle_style::{ass_color_from_user, resolve_subtitle_style};
pub use window::{extract_window, CueSelection};
