//! Render plans: the planner's output for one clip and for a batch.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cue::{ClipWindow, Cue};
use crate::face::DominantPeriod;
use crate::framing::{FramingInstruction, InstructionKind};
use crate::quality::QualityProfile;

/// Everything the external renderer needs to produce one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// Clip duration in seconds
    pub duration: f64,
    /// Framing instructions in application order
    pub instructions: Vec<FramingInstruction>,
    pub quality: QualityProfile,
    /// Clip-relative caption track
    pub cues: Vec<Cue>,
}

impl RenderPlan {
    pub fn instructions_of(&self, kind: InstructionKind) -> impl Iterator<Item = &FramingInstruction> {
        self.instructions.iter().filter(move |i| i.kind() == kind)
    }

    pub fn count_of(&self, kind: InstructionKind) -> usize {
        self.instructions_of(kind).count()
    }
}

/// A planned clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClipPlan {
    /// Position of the highlight in the request
    pub index: usize,
    /// Source window
    pub window: ClipWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// False when no cue intersected the window
    pub captioned: bool,
    /// Dominant periods of every active speaker, clip-relative
    pub periods: Vec<DominantPeriod>,
    pub render: RenderPlan,
}

/// A clip that could not be planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClipFailure {
    pub index: usize,
    pub start: String,
    pub end: String,
    pub error: String,
}

/// Result of planning a batch of highlights. Failures never abort siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchPlan {
    pub plans: Vec<ClipPlan>,
    pub failures: Vec<ClipFailure>,
}

impl BatchPlan {
    pub fn total(&self) -> usize {
        self.plans.len() + self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}
