//! Subtitle style resolution.

use vclip_models::{OutputResolution, SubtitleStyle, SubtitleStyleOverrides, VideoFormat};

pub const DEFAULT_FONT_NAME: &str = "Roboto";
pub const WHITE: &str = "&H00FFFFFF";
pub const BLACK: &str = "&H00000000";
/// Half-transparent black box behind text
pub const TRANSLUCENT_BLACK: &str = "&H80000000";

/// Resolve the subtitle style for a clip.
///
/// The size-like defaults (font size, outline, shadow, margins) are scaled by
/// the output resolution. Caller overrides replace them as given.
pub fn resolve_subtitle_style(
    overrides: &SubtitleStyleOverrides,
    resolution: OutputResolution,
    format: VideoFormat,
) -> SubtitleStyle {
    let vertical = format.is_vertical();
    let scale = |v: u32| (v as f64 * resolution.style_multiplier()).round() as u32;
    let color = |c: &Option<String>, default: &str| {
        c.as_deref()
            .map(ass_color_from_user)
            .unwrap_or_else(|| default.to_string())
    };

    SubtitleStyle {
        font_name: overrides
            .font_name
            .clone()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
        font_size: overrides
            .font_size
            .unwrap_or_else(|| scale(if vertical { 32 } else { 24 })),
        primary_color: color(&overrides.primary_color, WHITE),
        outline_color: color(&overrides.outline_color, BLACK),
        back_color: color(&overrides.back_color, TRANSLUCENT_BLACK),
        border_style: overrides.border_style.unwrap_or(3),
        outline: overrides.outline.unwrap_or_else(|| scale(2)),
        shadow: overrides.shadow.unwrap_or_else(|| scale(1)),
        alignment: overrides.alignment.unwrap_or(2),
        margin_v: overrides
            .margin_v
            .unwrap_or_else(|| scale(if vertical { 100 } else { 30 })),
        margin_l: overrides.margin_l.unwrap_or_else(|| scale(20)),
        margin_r: overrides.margin_r.unwrap_or_else(|| scale(20)),
    }
}

/// Convert a user colour to ASS `&HAABBGGRR`.
///
/// ASS literals pass through. `#RRGGBB`/`RRGGBB` are reordered with full
/// opacity; anything else becomes white.
pub fn ass_color_from_user(color: &str) -> String {
    let color = color.trim();
    if color.starts_with("&H") || color.starts_with("&h") {
        return color.to_string();
    }

    let hex = color.trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let (r, g, b) = (&hex[0..2], &hex[2..4], &hex[4..6]);
        format!("&H00{}{}{}", b, g, r).to_uppercase()
    } else {
        WHITE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_1080_defaults() {
        let style = resolve_subtitle_style(
            &SubtitleStyleOverrides::default(),
            OutputResolution::Fhd1080,
            VideoFormat::Vertical,
        );
        assert_eq!(style.font_name, "Roboto");
        assert_eq!(style.font_size, 32);
        assert_eq!(style.margin_v, 100);
        assert_eq!(style.primary_color, WHITE);
        assert_eq!(style.back_color, TRANSLUCENT_BLACK);
        assert_eq!((style.border_style, style.outline, style.shadow, style.alignment), (3, 2, 1, 2));
    }

    #[test]
    fn test_resolution_scaling() {
        let style = resolve_subtitle_style(
            &SubtitleStyleOverrides::default(),
            OutputResolution::Uhd4k,
            VideoFormat::Vertical,
        );
        // 32 * 1.8 = 57.6, 100 * 1.8 = 180, 2 * 1.8 = 3.6
        assert_eq!(style.font_size, 58);
        assert_eq!(style.margin_v, 180);
        assert_eq!(style.outline, 4);
        assert_eq!(style.shadow, 2);
        assert_eq!(style.margin_l, 36);

        let small = resolve_subtitle_style(
            &SubtitleStyleOverrides::default(),
            OutputResolution::Hd720,
            VideoFormat::Original,
        );
        // 24 * 0.8 = 19.2, 30 * 0.8 = 24
        assert_eq!(small.font_size, 19);
        assert_eq!(small.margin_v, 24);
    }

    #[test]
    fn test_overrides_apply_per_field() {
        let overrides = SubtitleStyleOverrides {
            font_name: Some("Inter".into()),
            font_size: Some(40),
            primary_color: Some("#FFCC00".into()),
            ..Default::default()
        };
        let style = resolve_subtitle_style(&overrides, OutputResolution::Qhd2k, VideoFormat::Vertical);
        assert_eq!(style.font_name, "Inter");
        assert_eq!(style.font_size, 40);
        // Unset sizes still scale: 100 * 1.4
        assert_eq!(style.margin_v, 140);
        assert_eq!(style.primary_color, "&H0000CCFF");
        assert_eq!(style.outline_color, BLACK);
    }

    #[test]
    fn test_size_overrides_are_not_scaled() {
        let overrides = SubtitleStyleOverrides {
            font_size: Some(40),
            margin_v: Some(50),
            outline: Some(1),
            ..Default::default()
        };
        let style = resolve_subtitle_style(&overrides, OutputResolution::Uhd4k, VideoFormat::Vertical);
        assert_eq!((style.font_size, style.margin_v, style.outline), (40, 50, 1));
        // 1 * 1.8 and 20 * 1.8
        assert_eq!(style.shadow, 2);
        assert_eq!(style.margin_l, 36);
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(ass_color_from_user("#FF0000"), "&H000000FF");
        assert_eq!(ass_color_from_user("00ff80"), "&H0080FF00");
        assert_eq!(ass_color_from_user("&H4000FF00"), "&H4000FF00");
        assert_eq!(ass_color_from_user("#FFF"), WHITE);
        assert_eq!(ass_color_from_user("red"), WHITE);
    }
}
