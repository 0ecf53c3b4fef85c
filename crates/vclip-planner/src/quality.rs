//! Quality profile resolution.
//!
//! Every option is free-form and optional. Unknown symbols resolve to the
//! defaults, so resolution never fails.

use tracing::debug;

use vclip_models::quality::{DEFAULT_PRESET, KNOWN_PRESETS};
use vclip_models::{
    BitrateOption, BitrateTarget, OutputResolution, QualityOptions, QualityProfile, QualityTier,
};

/// Peak bitrate relative to the target.
pub const MAX_RATE_MULTIPLIER: f64 = 1.5;
/// Rate-control buffer relative to the target.
pub const BUFFER_MULTIPLIER: f64 = 2.0;

/// Resolve user quality options into a complete encode profile.
pub fn resolve_quality(options: &QualityOptions) -> QualityProfile {
    let tier = options
        .quality
        .as_deref()
        .map(QualityTier::parse_or_default)
        .unwrap_or_default();

    let resolution = options
        .resolution
        .as_deref()
        .map(OutputResolution::parse_or_default)
        .unwrap_or_default();

    let bitrate = options
        .bitrate
        .as_deref()
        .map(BitrateOption::parse_or_default)
        .unwrap_or_default()
        .base_kbps()
        .map(|base| BitrateTarget {
            target_kbps: base,
            max_kbps: bitrate_kbps(base, MAX_RATE_MULTIPLIER),
            buffer_kbps: bitrate_kbps(base, BUFFER_MULTIPLIER),
        });

    let (width, height) = resolution.dimensions();

    let profile = QualityProfile {
        tier,
        crf: tier.crf(),
        preset: resolve_preset(options.preset.as_deref()),
        resolution,
        width,
        height,
        audio_bitrate_kbps: tier.audio_bitrate_kbps(),
        bitrate,
    };

    debug!(
        tier = %profile.tier,
        resolution = %profile.resolution,
        preset = %profile.preset,
        "Resolved quality profile"
    );

    profile
}

/// Scale a kbps value, rounding to the nearest integer.
pub fn bitrate_kbps(base: u32, multiplier: f64) -> u32 {
    (base as f64 * multiplier).round() as u32
}

fn resolve_preset(preset: Option<&str>) -> String {
    preset
        .map(|p| p.trim().to_lowercase())
        .filter(|p| KNOWN_PRESETS.contains(&p.as_str()))
        .unwrap_or_else(|| DEFAULT_PRESET.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(quality: &str, resolution: &str, bitrate: &str) -> QualityOptions {
        QualityOptions {
            quality: Some(quality.to_string()),
            preset: None,
            resolution: Some(resolution.to_string()),
            bitrate: Some(bitrate.to_string()),
        }
    }

    #[test]
    fn test_defaults() {
        let profile = resolve_quality(&QualityOptions::default());
        assert_eq!(profile.tier, QualityTier::High);
        assert_eq!(profile.crf, 18);
        assert_eq!(profile.preset, "slow");
        assert_eq!((profile.width, profile.height), (1080, 1920));
        assert_eq!(profile.audio_bitrate_kbps, 256);
        assert!(profile.bitrate.is_none());
    }

    #[test]
    fn test_ultra_4k_high_bitrate() {
        let profile = resolve_quality(&options("ultra", "4k", "high"));
        assert_eq!(profile.crf, 15);
        assert_eq!(profile.audio_bitrate_kbps, 320);
        assert_eq!(profile.dimensions_arg(), "2160:3840");
        assert_eq!(
            profile.bitrate,
            Some(BitrateTarget {
                target_kbps: 8000,
                max_kbps: 12000,
                buffer_kbps: 16000,
            })
        );
    }

    #[test]
    fn test_low_720p_low_bitrate() {
        let profile = resolve_quality(&options("low", "720p", "low"));
        assert_eq!(profile.crf, 28);
        assert_eq!(profile.audio_bitrate_kbps, 128);
        assert_eq!((profile.width, profile.height), (720, 1280));
        let bitrate = profile.bitrate.unwrap();
        assert_eq!((bitrate.target_kbps, bitrate.max_kbps, bitrate.buffer_kbps), (3000, 4500, 6000));
    }

    #[test]
    fn test_unknown_symbols_resolve_like_defaults() {
        let epic = resolve_quality(&options("epic", "8k", "turbo"));
        let high = resolve_quality(&options("high", "1080p", "auto"));
        assert_eq!(epic, high);
    }

    #[test]
    fn test_preset_passthrough_and_fallback() {
        let mut opts = QualityOptions::default();
        opts.preset = Some("VeryFast".into());
        assert_eq!(resolve_quality(&opts).preset, "veryfast");
        opts.preset = Some("ludicrous".into());
        assert_eq!(resolve_quality(&opts).preset, "slow");
    }

    #[test]
    fn test_bitrate_rounding() {
        assert_eq!(bitrate_kbps(8000, 1.5), 12000);
        assert_eq!(bitrate_kbps(5000, 1.5), 7500);
        assert_eq!(bitrate_kbps(3333, 1.5), 5000);
    }
}
