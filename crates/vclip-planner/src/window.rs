//! Window extraction: select, merge and re-base cues for one clip.
//!
//! Contract, in order:
//! 1. keep cues touching the window (within [`CUE_EPSILON_SECS`]) or spanning it
//! 2. sort by start and merge cues that overlap or touch the running cue
//! 3. shift to clip-relative time and clamp into `[0, duration]`
//! 4. renumber from 1
//!
//! After step 2 consecutive cues are separated by more than the epsilon, so
//! the output never overlaps.

use std::cmp::Ordering;

use tracing::debug;

use vclip_models::{ClipWindow, Cue};

/// Tolerance absorbing rounding in SRT millisecond timings.
pub const CUE_EPSILON_SECS: f64 = 0.001;

/// Shortest cue ever emitted.
pub const MIN_CUE_DURATION_SECS: f64 = 0.001;

/// Outcome of extracting a window's captions.
///
/// `Empty` is a normal outcome: the caller decides whether an unsubtitled
/// clip is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum CueSelection {
    Captioned(Vec<Cue>),
    Empty,
}

impl CueSelection {
    pub fn is_empty(&self) -> bool {
        matches!(self, CueSelection::Empty)
    }

    pub fn cues(&self) -> &[Cue] {
        match self {
            CueSelection::Captioned(cues) => cues,
            CueSelection::Empty => &[],
        }
    }

    pub fn into_cues(self) -> Vec<Cue> {
        match self {
            CueSelection::Captioned(cues) => cues,
            CueSelection::Empty => Vec::new(),
        }
    }
}

/// Extract the clip-relative cue track for `window`.
pub fn extract_window(cues: &[Cue], window: ClipWindow) -> CueSelection {
    let selected: Vec<&Cue> = cues.iter().filter(|c| intersects(c, window)).collect();

    if selected.is_empty() {
        debug!(
            start = window.start,
            end = window.end,
            "No cues intersect clip window"
        );
        return CueSelection::Empty;
    }

    let merged = merge_cues(selected);
    let duration = window.duration();

    let rebased = merged
        .into_iter()
        .enumerate()
        .map(|(i, (start, end, text))| {
            let (start, end) = rebase(start, end, window.start, duration);
            Cue::new(i as u32 + 1, start, end, text)
        })
        .collect();

    CueSelection::Captioned(rebased)
}

fn intersects(cue: &Cue, window: ClipWindow) -> bool {
    let lo = window.start - CUE_EPSILON_SECS;
    let hi = window.end + CUE_EPSILON_SECS;
    (cue.start > lo && cue.start < hi)
        || (cue.end > lo && cue.end < hi)
        || (cue.start <= window.start && cue.end >= window.end)
}

/// Merge overlapping or touching cues. Input order is preserved for equal
/// starts (stable sort).
fn merge_cues(mut selected: Vec<&Cue>) -> Vec<(f64, f64, String)> {
    selected.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

    let mut merged: Vec<(f64, f64, String)> = Vec::with_capacity(selected.len());
    for cue in selected {
        match merged.last_mut() {
            Some((_, end, text)) if cue.start <= *end + CUE_EPSILON_SECS => {
                let addition = cue.text.trim();
                if !addition.is_empty() {
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(addition);
                }
                *end = end.max(cue.end);
            }
            _ => merged.push((cue.start, cue.end, cue.text.trim().to_string())),
        }
    }
    merged
}

/// Shift a cue into clip time, clamped to `[0, duration]`, never shorter
/// than [`MIN_CUE_DURATION_SECS`].
fn rebase(start: f64, end: f64, offset: f64, duration: f64) -> (f64, f64) {
    let mut new_start = (start - offset).max(0.0);
    let new_end = (end - offset).min(duration);

    if new_end > new_start {
        return (new_start, new_end);
    }

    // Cues landing on the window end are pulled back so they still fit.
    if new_start + MIN_CUE_DURATION_SECS > duration && duration > MIN_CUE_DURATION_SECS {
        new_start = duration - MIN_CUE_DURATION_SECS;
    }
    (new_start, new_start + MIN_CUE_DURATION_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f64, end: f64) -> ClipWindow {
        ClipWindow::new(start, end).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_rebase_reference_case() {
        let cues = vec![
            Cue::new(7, 8.0, 12.0, "a"),
            Cue::new(8, 15.0, 20.0, "b"),
            Cue::new(9, 39.0, 45.0, "c"),
        ];
        let out = extract_window(&cues, window(10.0, 40.0)).into_cues();
        assert_eq!(out.len(), 3);
        assert!(approx(out[0].start, 0.0) && approx(out[0].end, 2.0));
        assert!(approx(out[1].start, 5.0) && approx(out[1].end, 10.0));
        assert!(approx(out[2].start, 29.0) && approx(out[2].end, 30.0));
        assert_eq!(
            out.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(out[2].text, "c");
    }

    #[test]
    fn test_empty_selection_is_signalled() {
        let cues = vec![Cue::new(1, 0.0, 1.0, "early")];
        let selection = extract_window(&cues, window(10.0, 20.0));
        assert!(selection.is_empty());
        assert!(selection.cues().is_empty());
    }

    #[test]
    fn test_spanning_cue_is_selected() {
        let cues = vec![Cue::new(1, 0.0, 100.0, "long")];
        let out = extract_window(&cues, window(10.0, 20.0)).into_cues();
        assert_eq!(out.len(), 1);
        assert!(approx(out[0].start, 0.0) && approx(out[0].end, 10.0));
    }

    #[test]
    fn test_overlapping_and_touching_cues_merge() {
        let cues = vec![
            Cue::new(1, 10.0, 11.0, "one"),
            Cue::new(2, 11.0, 12.0, "two"),
            Cue::new(3, 11.5, 11.8, "three"),
            Cue::new(4, 14.0, 15.0, "four"),
        ];
        let out = extract_window(&cues, window(10.0, 20.0)).into_cues();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "one two three");
        assert!(approx(out[0].end, 2.0));
        assert_eq!(out[1].text, "four");
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let cues = vec![
            Cue::new(1, 15.0, 16.0, "later"),
            Cue::new(2, 11.0, 12.0, "earlier"),
        ];
        let out = extract_window(&cues, window(10.0, 20.0)).into_cues();
        assert_eq!(out[0].text, "earlier");
        assert_eq!(out[1].text, "later");
    }

    #[test]
    fn test_cue_at_window_end_is_forced_minimal() {
        // Starts within epsilon after the window end.
        let cues = vec![Cue::new(1, 20.0005, 21.0, "edge")];
        let out = extract_window(&cues, window(10.0, 20.0)).into_cues();
        assert_eq!(out.len(), 1);
        assert!(out[0].end > out[0].start);
        assert!(out[0].end <= 10.0 + 1e-9);
        assert!(approx(out[0].end - out[0].start, MIN_CUE_DURATION_SECS));
    }

    #[test]
    fn test_output_invariants() {
        let cues: Vec<Cue> = (0..50)
            .map(|i| {
                let start = i as f64 * 0.7;
                Cue::new(i + 1, start, start + 0.9, format!("w{}", i))
            })
            .collect();
        let win = window(3.3, 17.1);
        let out = extract_window(&cues, win).into_cues();
        assert!(!out.is_empty());
        for cue in &out {
            assert!(cue.start >= 0.0);
            assert!(cue.start < cue.end);
            assert!(cue.end <= win.duration() + 1e-9);
        }
        for pair in out.windows(2) {
            assert!(pair[0].end <= pair[1].start + CUE_EPSILON_SECS);
        }
    }

    #[test]
    fn test_blank_text_does_not_add_spaces() {
        let cues = vec![
            Cue::new(1, 10.0, 11.0, "hi"),
            Cue::new(2, 10.5, 11.5, "  "),
        ];
        let out = extract_window(&cues, window(10.0, 20.0)).into_cues();
        assert_eq!(out[0].text, "hi");
    }
}
