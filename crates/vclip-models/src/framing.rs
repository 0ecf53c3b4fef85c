//! Declarative framing instructions handed to the external renderer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cue::Cue;
use crate::subtitle::SubtitleStyle;

/// Clip-relative `[start, end)` range during which an instruction applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActiveWindow {
    pub start: f64,
    pub end: f64,
}

impl ActiveWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Window spanning a whole clip of the given duration.
    pub fn whole_clip(duration: f64) -> Self {
        Self {
            start: 0.0,
            end: duration,
        }
    }

    pub fn covers_whole_clip(&self, duration: f64) -> bool {
        self.start <= 0.0 && self.end >= duration
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Instruction discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum InstructionKind {
    Crop,
    Scale,
    Zoom,
    ColorEnhance,
    Sharpen,
    Denoise,
    SubtitleOverlay,
}

impl InstructionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructionKind::Crop => "crop",
            InstructionKind::Scale => "scale",
            InstructionKind::Zoom => "zoom",
            InstructionKind::ColorEnhance => "colorEnhance",
            InstructionKind::Sharpen => "sharpen",
            InstructionKind::Denoise => "denoise",
            InstructionKind::SubtitleOverlay => "subtitleOverlay",
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single framing operation and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FramingOp {
    /// Source-pixel crop rectangle
    Crop {
        width: u32,
        height: u32,
        x: u32,
        y: u32,
    },
    /// Scale to the output resolution (fill, then crop overflow)
    Scale { width: u32, height: u32 },
    /// Subtle zoom: ramp in over `ramp_secs`, hold, ramp out over `ramp_secs`
    #[serde(rename_all = "camelCase")]
    Zoom { ramp_secs: f64, step: f64 },
    ColorEnhance {
        contrast: f64,
        brightness: f64,
        saturation: f64,
        gamma: f64,
    },
    #[serde(rename_all = "camelCase")]
    Sharpen {
        luma_size: u32,
        luma_amount: f64,
        chroma_size: u32,
        chroma_amount: f64,
    },
    #[serde(rename_all = "camelCase")]
    Denoise {
        luma_spatial: f64,
        chroma_spatial: f64,
        luma_temporal: f64,
        chroma_temporal: f64,
    },
    SubtitleOverlay { cues: Vec<Cue>, style: SubtitleStyle },
}

impl FramingOp {
    pub fn kind(&self) -> InstructionKind {
        match self {
            FramingOp::Crop { .. } => InstructionKind::Crop,
            FramingOp::Scale { .. } => InstructionKind::Scale,
            FramingOp::Zoom { .. } => InstructionKind::Zoom,
            FramingOp::ColorEnhance { .. } => InstructionKind::ColorEnhance,
            FramingOp::Sharpen { .. } => InstructionKind::Sharpen,
            FramingOp::Denoise { .. } => InstructionKind::Denoise,
            FramingOp::SubtitleOverlay { .. } => InstructionKind::SubtitleOverlay,
        }
    }
}

/// One declarative visual operation with its activation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FramingInstruction {
    pub window: ActiveWindow,
    #[serde(flatten)]
    pub op: FramingOp,
}

impl FramingInstruction {
    pub fn new(window: ActiveWindow, op: FramingOp) -> Self {
        Self { window, op }
    }

    pub fn kind(&self) -> InstructionKind {
        self.op.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_serializes_with_kind_tag() {
        let instruction = FramingInstruction::new(
            ActiveWindow::new(1.0, 4.0),
            FramingOp::Crop {
                width: 606,
                height: 1080,
                x: 100,
                y: 0,
            },
        );
        let value = serde_json::to_value(&instruction).unwrap();
        assert_eq!(value["kind"], "crop");
        assert_eq!(value["window"]["start"], 1.0);
        assert_eq!(value["x"], 100);
    }

    #[test]
    fn test_instruction_kind_wire_names() {
        let op = FramingOp::ColorEnhance {
            contrast: 1.15,
            brightness: 0.03,
            saturation: 1.2,
            gamma: 0.95,
        };
        let value = serde_json::to_value(FramingInstruction::new(ActiveWindow::whole_clip(30.0), op)).unwrap();
        assert_eq!(value["kind"], "colorEnhance");
        assert_eq!(InstructionKind::SubtitleOverlay.as_str(), "subtitleOverlay");
    }

    #[test]
    fn test_whole_clip_window() {
        let window = ActiveWindow::whole_clip(30.0);
        assert!(window.covers_whole_clip(30.0));
        assert!(!ActiveWindow::new(2.0, 10.0).covers_whole_clip(30.0));
    }
}
