//! Clip and batch planning.
//!
//! Planning is pure: the same inputs always produce the same plans. Within a
//! clip the cue extraction and speaker segmentation are independent and run
//! concurrently; across a batch every clip is planned in parallel and a
//! failing clip never affects its siblings.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use vclip_models::{
    BatchPlan, ClipFailure, ClipPlan, Cue, FaceAnalysis, FramingOptions, Highlight, QualityOptions,
    QualityProfile, SourceFrame, SubtitleStyleOverrides,
};

use crate::error::{PlannerError, PlannerResult};
use crate::framing::{build_render_plan, FramingContext};
use crate::normalizer::NormalizerConfig;
use crate::quality::resolve_quality;
use crate::segmenter::{segment_speakers, SegmenterConfig};
use crate::subtitle_style::resolve_subtitle_style;
use crate::window::{extract_window, CueSelection};

/// Planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    /// Treat a window without captions as a clip failure
    #[serde(default)]
    pub require_captions: bool,
}

/// Shared inputs for every clip of a batch.
#[derive(Debug, Clone, Default)]
pub struct PlanningInputs {
    /// Normalized source-time cues
    pub cues: Vec<Cue>,
    /// Face analysis; empty when none is available
    pub faces: FaceAnalysis,
    pub frame: SourceFrame,
    pub quality: QualityOptions,
    pub subtitle_style: SubtitleStyleOverrides,
    pub framing: FramingOptions,
}

/// Plans clips from highlights.
#[derive(Debug, Clone, Default)]
pub struct ClipPlanner {
    config: PlannerConfig,
}

impl ClipPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a single highlight.
    pub fn plan_clip(
        &self,
        inputs: &PlanningInputs,
        quality: &QualityProfile,
        highlight: &Highlight,
        index: usize,
    ) -> PlannerResult<ClipPlan> {
        let window = highlight.window(inputs.faces.video_duration)?;

        let (selection, activity) = rayon::join(
            || extract_window(&inputs.cues, window),
            || segment_speakers(&inputs.faces, window, &self.config.segmenter),
        );

        let captioned = !selection.is_empty();
        if !captioned && self.config.require_captions {
            return Err(PlannerError::EmptyWindowSelection {
                start: window.start,
                end: window.end,
            });
        }

        let ctx = FramingContext {
            duration: window.duration(),
            frame: inputs.frame,
            quality: quality.clone(),
            subtitle_style: resolve_subtitle_style(
                &inputs.subtitle_style,
                quality.resolution,
                inputs.framing.video_format,
            ),
            options: inputs.framing.clone(),
        };

        let periods = activity.periods();
        let render = build_render_plan(&activity, CueSelection::into_cues(selection), &ctx);

        debug!(
            index,
            start = window.start,
            end = window.end,
            captioned,
            periods = periods.len(),
            "Planned clip"
        );

        Ok(ClipPlan {
            index,
            window,
            reason: highlight.reason.clone(),
            captioned,
            periods,
            render,
        })
    }

    /// Plan every highlight, recording failures instead of aborting.
    ///
    /// Plans and failures are reported in input order.
    pub fn plan_batch(&self, inputs: &PlanningInputs, highlights: &[Highlight]) -> BatchPlan {
        let started = Instant::now();
        let quality = resolve_quality(&inputs.quality);

        let results: Vec<(usize, PlannerResult<ClipPlan>)> = highlights
            .par_iter()
            .enumerate()
            .map(|(index, highlight)| (index, self.plan_clip(inputs, &quality, highlight, index)))
            .collect();

        let mut batch = BatchPlan::default();
        for (index, result) in results {
            match result {
                Ok(plan) => batch.plans.push(plan),
                Err(e) => {
                    let highlight = &highlights[index];
                    warn!(
                        index,
                        start = %highlight.start,
                        end = %highlight.end,
                        error = %e,
                        "Failed to plan clip"
                    );
                    batch.failures.push(ClipFailure {
                        index,
                        start: highlight.start.clone(),
                        end: highlight.end.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            total = highlights.len(),
            planned = batch.plans.len(),
            failed = batch.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Planned batch"
        );

        batch
    }
}
