//! Output format and face-tracking style options.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output framing format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoFormat {
    /// 9:16 face-tracked crop, scaled to the profile resolution
    #[default]
    Vertical,
    /// Source aspect ratio preserved; no crop or scale
    Original,
}

impl VideoFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoFormat::Vertical => "vertical",
            VideoFormat::Original => "original",
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, VideoFormat::Vertical)
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VideoFormat {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vertical" => Ok(VideoFormat::Vertical),
            "original" | "horizontal" => Ok(VideoFormat::Original),
            _ => Err(StyleParseError::VideoFormat(s.to_string())),
        }
    }
}

/// How many zoom instructions a clip gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoomPolicy {
    /// A single zoom keyed to the first qualifying period, walking speakers
    /// in face-analysis order and then each speaker's periods
    #[default]
    FirstPeriod,
    /// A single zoom keyed to the chronologically earliest qualifying period
    EarliestPeriod,
    /// One zoom per qualifying period
    EveryPeriod,
}

impl ZoomPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomPolicy::FirstPeriod => "first_period",
            ZoomPolicy::EarliestPeriod => "earliest_period",
            ZoomPolicy::EveryPeriod => "every_period",
        }
    }
}

impl fmt::Display for ZoomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ZoomPolicy {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first_period" | "first" => Ok(ZoomPolicy::FirstPeriod),
            "earliest_period" | "earliest" => Ok(ZoomPolicy::EarliestPeriod),
            "every_period" | "every" | "all" => Ok(ZoomPolicy::EveryPeriod),
            _ => Err(StyleParseError::ZoomPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum StyleParseError {
    #[error("Unknown video format: {0}")]
    VideoFormat(String),
    #[error("Unknown zoom policy: {0}")]
    ZoomPolicy(String),
}

/// Face-tracking and effect toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FramingOptions {
    #[serde(default = "default_true")]
    pub enable_zoom: bool,

    #[serde(default)]
    pub enable_focus_effects: bool,

    #[serde(default = "default_true")]
    pub enhance_colors: bool,

    #[serde(default)]
    pub zoom_policy: ZoomPolicy,

    #[serde(default)]
    pub video_format: VideoFormat,
}

fn default_true() -> bool {
    true
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            enable_zoom: true,
            enable_focus_effects: false,
            enhance_colors: true,
            zoom_policy: ZoomPolicy::default(),
            video_format: VideoFormat::default(),
        }
    }
}
