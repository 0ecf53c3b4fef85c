//! Face-tracking input models and derived speaker periods.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Default source frame width when the caller does not provide one.
pub const DEFAULT_FRAME_WIDTH: u32 = 1920;
/// Default source frame height when the caller does not provide one.
pub const DEFAULT_FRAME_HEIGHT: u32 = 1080;
/// Smallest frame side an even-sided crop fits in.
pub const MIN_FRAME_SIDE: u32 = 2;

/// One face detection at a point in time.
///
/// `x`/`y` are source-frame pixels. When the detector also reports the face
/// centre (`center_x`/`center_y`) that is preferred for framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaceSample {
    /// Seconds from the start of the source video
    pub timestamp: f64,

    #[serde(deserialize_with = "speaker_id_from_any")]
    #[schemars(with = "String")]
    pub speaker_id: String,

    pub x: f64,
    pub y: f64,

    /// Detector confidence; higher wins
    pub confidence: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, alias = "center_x", skip_serializing_if = "Option::is_none")]
    pub center_x: Option<f64>,

    #[serde(default, alias = "center_y", skip_serializing_if = "Option::is_none")]
    pub center_y: Option<f64>,
}

impl FaceSample {
    pub fn new(timestamp: f64, speaker_id: impl Into<String>, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            timestamp,
            speaker_id: speaker_id.into(),
            x,
            y,
            confidence,
            width: None,
            height: None,
            center_x: None,
            center_y: None,
        }
    }

    /// Framing point for this sample.
    pub fn center(&self) -> (f64, f64) {
        match (self.center_x, self.center_y) {
            (Some(cx), Some(cy)) => (cx, cy),
            _ => (self.x, self.y),
        }
    }
}

/// A tracked speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Speaker {
    #[serde(deserialize_with = "speaker_id_from_any")]
    #[schemars(with = "String")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearances: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_time: Option<f64>,
}

impl Speaker {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            appearances: None,
            avg_confidence: None,
            first_seen: None,
            last_seen: None,
            screen_time: None,
        }
    }
}

/// Output of the external face-analysis step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceAnalysis {
    #[serde(default)]
    pub speakers: Vec<Speaker>,

    /// Samples in arrival order. The order is significant: it breaks
    /// confidence ties when picking a dominant face.
    #[serde(default)]
    pub faces: Vec<FaceSample>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<f64>,
}

impl FaceAnalysis {
    pub fn new(speakers: Vec<Speaker>, faces: Vec<FaceSample>) -> Self {
        Self {
            speakers,
            faces,
            video_duration: None,
        }
    }

    pub fn is_speaker_known(&self, speaker_id: &str) -> bool {
        self.speakers.iter().any(|s| s.id == speaker_id)
    }
}

/// Source video frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceFrame {
    pub width: u32,
    pub height: u32,
}

impl Default for SourceFrame {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl SourceFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both sides can hold an even-sided crop.
    pub fn is_usable(&self) -> bool {
        self.width >= MIN_FRAME_SIDE && self.height >= MIN_FRAME_SIDE
    }
}

/// A maximal, gap-tolerant range where one speaker was the dominant face.
///
/// Times are clip-relative seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DominantPeriod {
    pub speaker_id: String,
    pub start: f64,
    pub end: f64,
}

impl DominantPeriod {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Face detectors label speakers with either strings (`"speaker_0"`) or bare
/// integers; both are carried as strings.
fn speaker_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(i) => i.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}
