//! Speaker activity segmentation.
//!
//! Face samples are sparse and noisy, so framing targets are derived in two
//! steps rather than per frame:
//! 1. Step through the clip once per second and pick the highest-confidence
//!    sample near each step as that second's dominant face.
//! 2. Fold each speaker's dominant seconds into periods, bridging gaps of up
//!    to `gap_threshold_secs`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vclip_models::{ClipWindow, DominantPeriod, FaceAnalysis, FaceSample};

/// Segmenter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Spacing between sampling steps
    pub step_secs: f64,
    /// Samples strictly closer than this to a step belong to it
    pub sample_radius_secs: f64,
    /// Largest gap between recorded seconds that keeps a period open
    pub gap_threshold_secs: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            step_secs: 1.0,
            sample_radius_secs: 0.5,
            gap_threshold_secs: 2.0,
        }
    }
}

/// One recorded second for a speaker.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPoint {
    /// Clip-relative step time
    pub offset: f64,
    /// The dominant sample chosen for this step
    pub face: FaceSample,
}

/// Activity of one known speaker inside a clip window.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerTrack {
    pub speaker_id: String,
    pub activity: Vec<ActivityPoint>,
    pub periods: Vec<DominantPeriod>,
}

impl SpeakerTrack {
    pub fn is_active(&self) -> bool {
        !self.activity.is_empty()
    }

    /// Mean framing point of the recorded seconds inside `[start, end]`.
    pub fn mean_center_within(&self, start: f64, end: f64) -> Option<(f64, f64)> {
        let (sum_x, sum_y, count) = self
            .activity
            .iter()
            .filter(|a| a.offset >= start && a.offset <= end)
            .fold((0.0, 0.0, 0usize), |(sx, sy, n), a| {
                let (x, y) = a.face.center();
                (sx + x, sy + y, n + 1)
            });

        if count == 0 {
            None
        } else {
            Some((sum_x / count as f64, sum_y / count as f64))
        }
    }
}

/// Per-speaker activity for a clip, in face-analysis speaker order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakerActivity {
    pub speakers: Vec<SpeakerTrack>,
}

impl SpeakerActivity {
    /// Speakers with at least one recorded second.
    pub fn active_speakers(&self) -> impl Iterator<Item = &SpeakerTrack> + '_ {
        self.speakers.iter().filter(|s| s.is_active())
    }

    pub fn has_active_speakers(&self) -> bool {
        self.speakers.iter().any(SpeakerTrack::is_active)
    }

    /// All dominant periods of active speakers.
    pub fn periods(&self) -> Vec<DominantPeriod> {
        self.active_speakers()
            .flat_map(|s| s.periods.iter().cloned())
            .collect()
    }
}

/// Build per-speaker dominant periods for `window`.
pub fn segment_speakers(
    analysis: &FaceAnalysis,
    window: ClipWindow,
    config: &SegmenterConfig,
) -> SpeakerActivity {
    // Arrival order is kept; it is the tie-breaker below.
    let clip_faces: Vec<&FaceSample> = analysis
        .faces
        .iter()
        .filter(|f| window.contains_inclusive(f.timestamp))
        .collect();

    let mut tracks: Vec<SpeakerTrack> = analysis
        .speakers
        .iter()
        .map(|s| SpeakerTrack {
            speaker_id: s.id.clone(),
            activity: Vec::new(),
            periods: Vec::new(),
        })
        .collect();

    if !clip_faces.is_empty() && config.step_secs > 0.0 {
        for step in 0u64.. {
            let t = window.start + step as f64 * config.step_secs;
            if t >= window.end {
                break;
            }

            let Some(face) = dominant_face(&clip_faces, t, config.sample_radius_secs) else {
                continue;
            };

            if let Some(track) = tracks.iter_mut().find(|tr| tr.speaker_id == face.speaker_id) {
                track.activity.push(ActivityPoint {
                    offset: t - window.start,
                    face: face.clone(),
                });
            }
        }
    }

    for track in &mut tracks {
        let offsets: Vec<f64> = track.activity.iter().map(|a| a.offset).collect();
        track.periods = fold_periods(&offsets, config.gap_threshold_secs)
            .into_iter()
            .map(|(start, end)| DominantPeriod {
                speaker_id: track.speaker_id.clone(),
                start,
                end,
            })
            .collect();
    }

    debug!(
        faces = clip_faces.len(),
        active_speakers = tracks.iter().filter(|t| t.is_active()).count(),
        "Segmented speaker activity"
    );

    SpeakerActivity { speakers: tracks }
}

/// Highest-confidence sample within `radius` of `t`.
///
/// Only a strictly greater confidence replaces the current pick, so among
/// equal confidences the first sample in input order wins.
fn dominant_face<'a>(faces: &[&'a FaceSample], t: f64, radius: f64) -> Option<&'a FaceSample> {
    faces
        .iter()
        .copied()
        .filter(|f| (f.timestamp - t).abs() < radius)
        .fold(None, |best: Option<&FaceSample>, face| match best {
            Some(b) if face.confidence > b.confidence => Some(face),
            Some(b) => Some(b),
            None => Some(face),
        })
}

/// Fold ascending recorded offsets into `(start, end)` periods.
///
/// A gap larger than `gap_threshold` closes the current period; the next
/// offset opens a new one.
pub fn fold_periods(offsets: &[f64], gap_threshold: f64) -> Vec<(f64, f64)> {
    let mut periods = Vec::new();
    let mut iter = offsets.iter().copied();

    let Some(first) = iter.next() else {
        return periods;
    };

    let (mut start, mut end) = (first, first);
    for t in iter {
        if t - end > gap_threshold {
            periods.push((start, end));
            start = t;
        }
        end = t;
    }
    periods.push((start, end));
    periods
}
