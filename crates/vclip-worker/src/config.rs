//! Worker configuration.

use std::time::Duration;

use vclip_models::{SourceFrame, ZoomPolicy};
use vclip_planner::{NormalizerConfig, PlannerConfig};

/// Worker configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerWorkerConfig {
    /// Words per caption chunk for segment-level transcripts
    pub chunk_words: usize,
    /// Fail clips whose window has no captions
    pub require_captions: bool,
    /// How long a planned session stays retrievable
    pub session_ttl: Duration,
    /// How often expired sessions are swept
    pub sweep_interval: Duration,
    /// Source frame used when a job does not specify one
    pub frame: SourceFrame,
    /// Zoom policy used when a job does not specify framing options
    pub zoom_policy: ZoomPolicy,
}

impl Default for PlannerWorkerConfig {
    fn default() -> Self {
        Self {
            chunk_words: 4,
            require_captions: false,
            session_ttl: Duration::from_secs(1800), // 30 minutes
            sweep_interval: Duration::from_secs(600), // 10 minutes
            frame: SourceFrame::default(),
            zoom_policy: ZoomPolicy::FirstPeriod,
        }
    }
}

impl PlannerWorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup. Unparseable values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            chunk_words: lookup("PLANNER_CHUNK_WORDS")
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.chunk_words),
            require_captions: lookup("PLANNER_REQUIRE_CAPTIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.require_captions),
            session_ttl: lookup("PLANNER_SESSION_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            sweep_interval: lookup("PLANNER_SWEEP_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            frame: Some(SourceFrame::new(
                lookup("PLANNER_FRAME_WIDTH")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.frame.width),
                lookup("PLANNER_FRAME_HEIGHT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.frame.height),
            ))
            .filter(SourceFrame::is_usable)
            .unwrap_or(defaults.frame),
            zoom_policy: lookup("PLANNER_ZOOM_POLICY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.zoom_policy),
        }
    }

    /// Planner settings derived from this config.
    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            normalizer: NormalizerConfig {
                chunk_words: self.chunk_words,
            },
            require_captions: self.require_captions,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = PlannerWorkerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PlannerWorkerConfig::default());
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.sweep_interval, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = PlannerWorkerConfig::from_lookup(lookup(&[
            ("PLANNER_CHUNK_WORDS", "6"),
            ("PLANNER_REQUIRE_CAPTIONS", "true"),
            ("PLANNER_SESSION_TTL_SECS", "60"),
            ("PLANNER_FRAME_WIDTH", "1280"),
            ("PLANNER_FRAME_HEIGHT", "720"),
            ("PLANNER_ZOOM_POLICY", "every"),
        ]));
        assert_eq!(config.chunk_words, 6);
        assert!(config.require_captions);
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(config.frame, SourceFrame::new(1280, 720));
        assert_eq!(config.zoom_policy, ZoomPolicy::EveryPeriod);

        let planner = config.planner_config();
        assert_eq!(planner.normalizer.chunk_words, 6);
        assert!(planner.require_captions);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = PlannerWorkerConfig::from_lookup(lookup(&[
            ("PLANNER_CHUNK_WORDS", "zero"),
            ("PLANNER_SWEEP_INTERVAL_SECS", "0"),
            ("PLANNER_ZOOM_POLICY", "sometimes"),
        ]));
        assert_eq!(config.chunk_words, 4);
        assert_eq!(config.sweep_interval, Duration::from_secs(600));
        assert_eq!(config.zoom_policy, ZoomPolicy::FirstPeriod);
    }

    #[test]
    fn test_unusable_frame_falls_back() {
        let config = PlannerWorkerConfig::from_lookup(lookup(&[
            ("PLANNER_FRAME_WIDTH", "1"),
            ("PLANNER_FRAME_HEIGHT", "720"),
        ]));
        assert_eq!(config.frame, SourceFrame::default());
    }
}
