//! Framing plan construction.
//!
//! Turns speaker activity into an ordered list of declarative instructions:
//! crops (or a centred fallback), output scale, zoom, focus sharpen, colour
//! enhancement, premium sharpen and denoise, and finally the subtitle
//! overlay. The external renderer applies them in list order.

use tracing::debug;

use vclip_models::{
    ActiveWindow, Cue, DominantPeriod, FramingInstruction, FramingOp, FramingOptions,
    QualityProfile, RenderPlan, SourceFrame, SubtitleStyle, ZoomPolicy,
};

use crate::segmenter::{SpeakerActivity, SpeakerTrack};

/// Periods must be longer than this to get their own crop.
pub const MIN_CROP_PERIOD_SECS: f64 = 1.0;
/// Periods must be longer than this to get a zoom.
pub const MIN_ZOOM_PERIOD_SECS: f64 = 2.0;
pub const ZOOM_RAMP_SECS: f64 = 0.5;
pub const ZOOM_STEP: f64 = 0.02;

/// Portrait output aspect ratio (width / height).
const PORTRAIT_RATIO: f64 = 9.0 / 16.0;

/// Everything besides speaker activity and cues that shapes a render plan.
#[derive(Debug, Clone)]
pub struct FramingContext {
    /// Clip duration in seconds
    pub duration: f64,
    pub frame: SourceFrame,
    pub quality: QualityProfile,
    pub subtitle_style: SubtitleStyle,
    pub options: FramingOptions,
}

/// Portrait crop geometry for one source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortraitCrop {
    pub width: u32,
    pub height: u32,
    frame: SourceFrame,
}

impl PortraitCrop {
    /// Largest 9:16 rectangle with even sides that fits `frame`.
    ///
    /// The crop never exceeds the frame; a frame narrower than two pixels
    /// yields an empty side.
    pub fn for_frame(frame: SourceFrame) -> Self {
        let fw = frame.width.max(2) as f64;
        let fh = frame.height.max(2) as f64;

        let (w, h) = if fw / fh >= PORTRAIT_RATIO {
            (fh * PORTRAIT_RATIO, fh)
        } else {
            (fw, fw / PORTRAIT_RATIO)
        };

        // Even dimensions, never larger than the frame
        let width = (even(w) as u32).max(2).min(frame.width - frame.width % 2);
        let height = (even(h) as u32).max(2).min(frame.height - frame.height % 2);

        Self {
            width,
            height,
            frame,
        }
    }

    /// Crop centred on `(cx, cy)`, clamped to the frame.
    pub fn centered_on(&self, cx: f64, cy: f64) -> FramingOp {
        let max_x = self.frame.width.saturating_sub(self.width) as f64;
        let max_y = self.frame.height.saturating_sub(self.height) as f64;

        let x = (cx - self.width as f64 / 2.0).round().clamp(0.0, max_x);
        let y = (cy - self.height as f64 / 2.0).round().clamp(0.0, max_y);

        FramingOp::Crop {
            width: self.width,
            height: self.height,
            x: x as u32,
            y: y as u32,
        }
    }

    /// Crop centred on the frame.
    pub fn frame_centered(&self) -> FramingOp {
        self.centered_on(self.frame.width as f64 / 2.0, self.frame.height as f64 / 2.0)
    }
}

fn even(v: f64) -> i64 {
    ((v.round() as i64) / 2) * 2
}

/// Build the render plan for one clip.
pub fn build_render_plan(activity: &SpeakerActivity, cues: Vec<Cue>, ctx: &FramingContext) -> RenderPlan {
    let duration = ctx.duration;
    let whole_clip = ActiveWindow::whole_clip(duration);
    let mut instructions = Vec::new();

    // Speaker order, then each speaker's periods
    let speaker_periods: Vec<(&SpeakerTrack, &DominantPeriod)> = activity
        .active_speakers()
        .flat_map(|track| track.periods.iter().map(move |p| (track, p)))
        .collect();

    // Chronological, ties keep speaker order (stable sort)
    let mut periods = speaker_periods.clone();
    periods.sort_by(|a, b| a.1.start.total_cmp(&b.1.start));

    if ctx.options.video_format.is_vertical() {
        let crop = PortraitCrop::for_frame(ctx.frame);
        let crop_periods: Vec<_> = periods
            .iter()
            .filter(|(_, p)| p.length() > MIN_CROP_PERIOD_SECS)
            .collect();

        if crop_periods.is_empty() {
            instructions.push(FramingInstruction::new(whole_clip, crop.frame_centered()));
        } else {
            for (track, period) in crop_periods {
                let op = match track.mean_center_within(period.start, period.end) {
                    Some((cx, cy)) => crop.centered_on(cx, cy),
                    None => crop.frame_centered(),
                };
                instructions.push(FramingInstruction::new(
                    ActiveWindow::new(period.start, period.end),
                    op,
                ));
            }
        }

        instructions.push(FramingInstruction::new(
            whole_clip,
            FramingOp::Scale {
                width: ctx.quality.width,
                height: ctx.quality.height,
            },
        ));
    }

    if ctx.options.enable_zoom {
        let (ordered, take) = match ctx.options.zoom_policy {
            ZoomPolicy::FirstPeriod => (&speaker_periods, 1),
            ZoomPolicy::EarliestPeriod => (&periods, 1),
            ZoomPolicy::EveryPeriod => (&periods, usize::MAX),
        };
        let candidates = ordered
            .iter()
            .filter(|(_, p)| p.length() > MIN_ZOOM_PERIOD_SECS);
        for (_, period) in candidates.take(take) {
            instructions.push(FramingInstruction::new(
                ActiveWindow::new(period.start, period.end),
                FramingOp::Zoom {
                    ramp_secs: ZOOM_RAMP_SECS,
                    step: ZOOM_STEP,
                },
            ));
        }
    }

    if ctx.options.enable_focus_effects {
        instructions.push(FramingInstruction::new(whole_clip, focus_sharpen()));
    }

    if ctx.options.enhance_colors {
        instructions.push(FramingInstruction::new(
            whole_clip,
            FramingOp::ColorEnhance {
                contrast: 1.15,
                brightness: 0.03,
                saturation: 1.2,
                gamma: 0.95,
            },
        ));
    }

    if ctx.quality.tier.is_premium() {
        instructions.push(FramingInstruction::new(
            whole_clip,
            FramingOp::Sharpen {
                luma_size: 5,
                luma_amount: 0.8,
                chroma_size: 5,
                chroma_amount: 0.4,
            },
        ));
        instructions.push(FramingInstruction::new(
            whole_clip,
            FramingOp::Denoise {
                luma_spatial: 4.0,
                chroma_spatial: 3.0,
                luma_temporal: 6.0,
                chroma_temporal: 4.5,
            },
        ));
    }

    instructions.push(FramingInstruction::new(
        whole_clip,
        FramingOp::SubtitleOverlay {
            cues: cues.clone(),
            style: ctx.subtitle_style.clone(),
        },
    ));

    debug!(
        duration,
        instructions = instructions.len(),
        periods = periods.len(),
        "Built render plan"
    );

    RenderPlan {
        duration,
        instructions,
        quality: ctx.quality.clone(),
        cues,
    }
}

fn focus_sharpen() -> FramingOp {
    FramingOp::Sharpen {
        luma_size: 5,
        luma_amount: 1.0,
        chroma_size: 5,
        chroma_amount: 0.0,
    }
}
