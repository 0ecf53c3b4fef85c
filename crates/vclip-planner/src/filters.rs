//! FFmpeg filter rendering for framing instructions.
//!
//! The render plan stays declarative; these helpers produce the `-vf` chain a
//! renderer would pass to FFmpeg for it.

use vclip_models::{FramingInstruction, FramingOp, RenderPlan};

/// Render one instruction as an FFmpeg filter expression.
///
/// Instructions active for only part of the clip get an
/// `enable='between(t,a,b)'` option. Subtitle overlays need the path of the
/// rendered SRT file and yield `None` without one.
pub fn instruction_filter(
    instruction: &FramingInstruction,
    duration: f64,
    subtitle_path: Option<&str>,
) -> Option<String> {
    let window = instruction.window;
    let timed = |filter: String| {
        if window.covers_whole_clip(duration) {
            filter
        } else {
            format!(
                "{}:enable='between(t,{},{})'",
                filter,
                secs(window.start),
                secs(window.end)
            )
        }
    };

    let filter = match &instruction.op {
        FramingOp::Crop {
            width,
            height,
            x,
            y,
        } => timed(format!("crop={}:{}:{}:{}", width, height, x, y)),
        FramingOp::Scale { width, height } => format!(
            "scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h}",
            w = width,
            h = height
        ),
        FramingOp::Zoom { ramp_secs, step } => format!(
            "zoompan=z='if(between(t,{s},{s_ramp}),zoom+{step},if(between(t,{e_ramp},{e}),zoom-{step},zoom))':d=1:x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)'",
            s = secs(window.start),
            s_ramp = secs(window.start + ramp_secs),
            e_ramp = secs(window.end - ramp_secs),
            e = secs(window.end),
            step = step
        ),
        FramingOp::ColorEnhance {
            contrast,
            brightness,
            saturation,
            gamma,
        } => timed(format!(
            "eq=contrast={}:brightness={}:saturation={}:gamma={}",
            contrast, brightness, saturation, gamma
        )),
        FramingOp::Sharpen {
            luma_size,
            luma_amount,
            chroma_size,
            chroma_amount,
        } => timed(format!(
            "unsharp=luma_msize_x={l}:luma_msize_y={l}:luma_amount={la}:chroma_msize_x={c}:chroma_msize_y={c}:chroma_amount={ca}",
            l = luma_size,
            la = luma_amount,
            c = chroma_size,
            ca = chroma_amount
        )),
        FramingOp::Denoise {
            luma_spatial,
            chroma_spatial,
            luma_temporal,
            chroma_temporal,
        } => timed(format!(
            "hqdn3d=luma_spatial={}:chroma_spatial={}:luma_tmp={}:chroma_tmp={}",
            luma_spatial, chroma_spatial, luma_temporal, chroma_temporal
        )),
        FramingOp::SubtitleOverlay { style, .. } => {
            let path = subtitle_path?;
            format!(
                "subtitles={}:force_style='{}'",
                escape_filter_path(path),
                style.to_force_style()
            )
        }
    };

    Some(filter)
}

/// Render the whole `-vf` chain for a plan.
pub fn build_filter_chain(plan: &RenderPlan, subtitle_path: Option<&str>) -> String {
    plan.instructions
        .iter()
        .filter_map(|i| instruction_filter(i, plan.duration, subtitle_path))
        .collect::<Vec<_>>()
        .join(",")
}

/// Seconds with at most millisecond precision, without trailing zeros.
fn secs(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

/// Escape characters the filter graph parser treats specially.
fn escape_filter_path(path: &str) -> String {
    path.replace('\\', "/").replace(':', "\\:").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vclip_models::{ActiveWindow, BitrateTarget, Cue, OutputResolution, QualityProfile, QualityTier, SubtitleStyle};

    fn style() -> SubtitleStyle {
        SubtitleStyle {
            font_name: "Roboto".into(),
            font_size: 32,
            primary_color: "&H00FFFFFF".into(),
            outline_color: "&H00000000".into(),
            back_color: "&H80000000".into(),
            border_style: 3,
            outline: 2,
            shadow: 1,
            alignment: 2,
            margin_v: 100,
            margin_l: 20,
            margin_r: 20,
        }
    }

    fn instr(start: f64, end: f64, op: FramingOp) -> FramingInstruction {
        FramingInstruction::new(ActiveWindow::new(start, end), op)
    }

    #[test]
    fn test_sub_range_crop_is_enabled_by_time() {
        let crop = instr(
            2.0,
            5.5,
            FramingOp::Crop {
                width: 608,
                height: 1080,
                x: 100,
                y: 0,
            },
        );
        assert_eq!(
            instruction_filter(&crop, 30.0, None).unwrap(),
            "crop=608:1080:100:0:enable='between(t,2,5.5)'"
        );
    }

    #[test]
    fn test_whole_clip_filters_have_no_enable() {
        let eq = instr(
            0.0,
            30.0,
            FramingOp::ColorEnhance {
                contrast: 1.15,
                brightness: 0.03,
                saturation: 1.2,
                gamma: 0.95,
            },
        );
        assert_eq!(
            instruction_filter(&eq, 30.0, None).unwrap(),
            "eq=contrast=1.15:brightness=0.03:saturation=1.2:gamma=0.95"
        );

        let denoise = instr(
            0.0,
            30.0,
            FramingOp::Denoise {
                luma_spatial: 4.0,
                chroma_spatial: 3.0,
                luma_temporal: 6.0,
                chroma_temporal: 4.5,
            },
        );
        assert_eq!(
            instruction_filter(&denoise, 30.0, None).unwrap(),
            "hqdn3d=luma_spatial=4:chroma_spatial=3:luma_tmp=6:chroma_tmp=4.5"
        );
    }

    #[test]
    fn test_zoom_ramps_at_period_edges() {
        let zoom = instr(
            4.0,
            9.0,
            FramingOp::Zoom {
                ramp_secs: 0.5,
                step: 0.02,
            },
        );
        let filter = instruction_filter(&zoom, 30.0, None).unwrap();
        assert!(filter.starts_with("zoompan=z='if(between(t,4,4.5),zoom+0.02,if(between(t,8.5,9),zoom-0.02,zoom))'"));
    }

    #[test]
    fn test_subtitles_need_a_path() {
        let overlay = instr(
            0.0,
            30.0,
            FramingOp::SubtitleOverlay {
                cues: vec![Cue::new(1, 0.0, 1.0, "hi")],
                style: style(),
            },
        );
        assert!(instruction_filter(&overlay, 30.0, None).is_none());
        let filter = instruction_filter(&overlay, 30.0, Some("C:\\tmp\\clip.srt")).unwrap();
        assert!(filter.starts_with("subtitles=C\\:/tmp/clip.srt:force_style='FontName=Roboto,"));
    }

    #[test]
    fn test_filter_chain_joins_in_order() {
        let plan = RenderPlan {
            duration: 30.0,
            instructions: vec![
                instr(0.0, 30.0, FramingOp::Scale { width: 1080, height: 1920 }),
                instr(
                    0.0,
                    30.0,
                    FramingOp::SubtitleOverlay {
                        cues: Vec::new(),
                        style: style(),
                    },
                ),
            ],
            quality: QualityProfile {
                tier: QualityTier::High,
                crf: 18,
                preset: "slow".into(),
                resolution: OutputResolution::Fhd1080,
                width: 1080,
                height: 1920,
                audio_bitrate_kbps: 256,
                bitrate: None::<BitrateTarget>,
            },
            cues: Vec::new(),
        };
        assert_eq!(
            build_filter_chain(&plan, None),
            "scale=1080:1920:force_original_aspect_ratio=increase,crop=1080:1920"
        );
        let with_subs = build_filter_chain(&plan, Some("/tmp/a.srt"));
        assert!(with_subs.contains(",subtitles=/tmp/a.srt:force_style="));
    }
}
