//! Output quality options and the resolved encode profile.
//!
//! Users pick symbolic values (`ultra`, `4k`, `auto`, ...). Those arrive as a
//! partial [`QualityOptions`] and are resolved by the planner into a
//! [`QualityProfile`] whose fields are all populated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Video codec used for rendered clips
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Audio codec used for rendered clips
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Encoder preset when none (or an unknown one) is requested
pub const DEFAULT_PRESET: &str = "slow";
/// Audio sample rate for rendered clips
pub const AUDIO_SAMPLE_RATE: u32 = 44100;
/// Audio channel count for rendered clips
pub const AUDIO_CHANNELS: u32 = 2;

/// x264 presets accepted verbatim.
pub const KNOWN_PRESETS: &[&str] = &[
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
    "placebo",
];

/// Symbolic quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Ultra,
    #[default]
    High,
    Medium,
    Low,
}

impl QualityTier {
    /// Parse from string (case-insensitive); unknown values map to the default.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ultra" => QualityTier::Ultra,
            "high" => QualityTier::High,
            "medium" => QualityTier::Medium,
            "low" => QualityTier::Low,
            _ => QualityTier::default(),
        }
    }

    /// Constant Rate Factor (lower is better).
    pub fn crf(&self) -> u8 {
        match self {
            QualityTier::Ultra => 15,
            QualityTier::High => 18,
            QualityTier::Medium => 23,
            QualityTier::Low => 28,
        }
    }

    pub fn audio_bitrate_kbps(&self) -> u32 {
        match self {
            QualityTier::Ultra => 320,
            QualityTier::High => 256,
            QualityTier::Medium => 192,
            QualityTier::Low => 128,
        }
    }

    /// The two highest tiers get the extra sharpen/denoise passes.
    pub fn is_premium(&self) -> bool {
        matches!(self, QualityTier::Ultra | QualityTier::High)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Ultra => "ultra",
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Low => "low",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Symbolic vertical output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum OutputResolution {
    #[serde(rename = "4k")]
    Uhd4k,
    #[serde(rename = "2k")]
    Qhd2k,
    #[default]
    #[serde(rename = "1080p")]
    Fhd1080,
    #[serde(rename = "720p")]
    Hd720,
}

impl OutputResolution {
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "4k" => OutputResolution::Uhd4k,
            "2k" => OutputResolution::Qhd2k,
            "1080p" => OutputResolution::Fhd1080,
            "720p" => OutputResolution::Hd720,
            _ => OutputResolution::default(),
        }
    }

    /// Vertical `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            OutputResolution::Uhd4k => (2160, 3840),
            OutputResolution::Qhd2k => (1440, 2560),
            OutputResolution::Fhd1080 => (1080, 1920),
            OutputResolution::Hd720 => (720, 1280),
        }
    }

    /// Multiplier applied to size-like subtitle style fields.
    pub fn style_multiplier(&self) -> f64 {
        match self {
            OutputResolution::Uhd4k => 1.8,
            OutputResolution::Qhd2k => 1.4,
            OutputResolution::Fhd1080 => 1.0,
            OutputResolution::Hd720 => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputResolution::Uhd4k => "4k",
            OutputResolution::Qhd2k => "2k",
            OutputResolution::Fhd1080 => "1080p",
            OutputResolution::Hd720 => "720p",
        }
    }
}

impl fmt::Display for OutputResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Symbolic bitrate option. `Auto` keeps CRF-driven encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum BitrateOption {
    #[default]
    Auto,
    High,
    Medium,
    Low,
}

impl BitrateOption {
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "auto" => BitrateOption::Auto,
            "high" => BitrateOption::High,
            "medium" => BitrateOption::Medium,
            "low" => BitrateOption::Low,
            _ => BitrateOption::default(),
        }
    }

    /// Base video bitrate in kbps, `None` for `Auto`.
    pub fn base_kbps(&self) -> Option<u32> {
        match self {
            BitrateOption::Auto => None,
            BitrateOption::High => Some(8000),
            BitrateOption::Medium => Some(5000),
            BitrateOption::Low => Some(3000),
        }
    }
}

/// Partial, user-supplied quality choices. Every field is optional and
/// free-form; resolution never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
}

/// Explicit bitrate targets used instead of CRF-only rate control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BitrateTarget {
    pub target_kbps: u32,
    pub max_kbps: u32,
    pub buffer_kbps: u32,
}

/// Fully resolved encode parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfile {
    pub tier: QualityTier,
    pub crf: u8,
    pub preset: String,
    pub resolution: OutputResolution,
    pub width: u32,
    pub height: u32,
    pub audio_bitrate_kbps: u32,
    /// `None` means CRF-driven encoding
    pub bitrate: Option<BitrateTarget>,
}

impl QualityProfile {
    /// `width:height` as used by FFmpeg `scale`/`crop`.
    pub fn dimensions_arg(&self) -> String {
        format!("{}:{}", self.width, self.height)
    }

    /// Convert to FFmpeg output arguments.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            DEFAULT_VIDEO_CODEC.to_string(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-preset".to_string(),
            self.preset.clone(),
            "-profile:v".to_string(),
            "high".to_string(),
            "-level:v".to_string(),
            "4.1".to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
        ];

        if let Some(bitrate) = &self.bitrate {
            args.extend_from_slice(&[
                "-b:v".to_string(),
                format!("{}k", bitrate.target_kbps),
                "-maxrate".to_string(),
                format!("{}k", bitrate.max_kbps),
                "-bufsize".to_string(),
                format!("{}k", bitrate.buffer_kbps),
            ]);
        }

        args.extend_from_slice(&[
            "-c:a".to_string(),
            DEFAULT_AUDIO_CODEC.to_string(),
            "-b:a".to_string(),
            format!("{}k", self.audio_bitrate_kbps),
            "-ar".to_string(),
            AUDIO_SAMPLE_RATE.to_string(),
            "-ac".to_string(),
            AUDIO_CHANNELS.to_string(),
        ]);

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(bitrate: Option<BitrateTarget>) -> QualityProfile {
        QualityProfile {
            tier: QualityTier::High,
            crf: 18,
            preset: DEFAULT_PRESET.to_string(),
            resolution: OutputResolution::Fhd1080,
            width: 1080,
            height: 1920,
            audio_bitrate_kbps: 256,
            bitrate,
        }
    }

    #[test]
    fn test_symbol_parsing_defaults() {
        assert_eq!(QualityTier::parse_or_default("ULTRA"), QualityTier::Ultra);
        assert_eq!(QualityTier::parse_or_default("epic"), QualityTier::High);
        assert_eq!(OutputResolution::parse_or_default("720p"), OutputResolution::Hd720);
        assert_eq!(OutputResolution::parse_or_default("8k"), OutputResolution::Fhd1080);
        assert_eq!(BitrateOption::parse_or_default("turbo"), BitrateOption::Auto);
    }

    #[test]
    fn test_ffmpeg_args_crf_only() {
        let args = profile(None).to_ffmpeg_args();
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&"256k".to_string()));
        assert!(!args.contains(&"-maxrate".to_string()));
    }

    #[test]
    fn test_ffmpeg_args_with_bitrate() {
        let args = profile(Some(BitrateTarget {
            target_kbps: 8000,
            max_kbps: 12000,
            buffer_kbps: 16000,
        }))
        .to_ffmpeg_args();
        let maxrate = args.iter().position(|a| a == "-maxrate").unwrap();
        assert_eq!(args[maxrate + 1], "12000k");
    }

    #[test]
    fn test_resolution_wire_names() {
        let json = serde_json::to_string(&OutputResolution::Uhd4k).unwrap();
        assert_eq!(json, "\"4k\"");
    }
}
