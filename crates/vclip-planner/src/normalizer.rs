//! Transcript normalization into a single ordered cue sequence.
//!
//! Word-level transcripts map one word to one cue. Segment-level transcripts
//! are split into chunks of `chunk_words` words whose boundaries are
//! proportional to word position inside the segment, not to measured speech
//! rate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vclip_models::{Cue, TranscriptPayload, TranscriptSegment, TranscriptSource, TranscriptWord};

/// Default number of words per caption chunk in segment mode.
pub const DEFAULT_CHUNK_WORDS: usize = 4;

/// Normalizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Words per cue when splitting segments
    pub chunk_words: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            chunk_words: DEFAULT_CHUNK_WORDS,
        }
    }
}

/// Normalize a transcript payload using whichever granularity it carries.
pub fn normalize(payload: &TranscriptPayload, config: &NormalizerConfig) -> Vec<Cue> {
    let cues = match payload.source() {
        TranscriptSource::Words(words) => normalize_words(words),
        TranscriptSource::Segments(segments) => normalize_segments(segments, config.chunk_words),
    };
    debug!(cues = cues.len(), "Normalized transcript");
    cues
}

/// One cue per word, bounds copied verbatim.
pub fn normalize_words(words: &[TranscriptWord]) -> Vec<Cue> {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| Cue::new(i as u32 + 1, w.start, w.end, w.word.trim()))
        .collect()
}

/// Split segments into `chunk_words`-word cues.
///
/// Chunk `i` of a segment with `n` words, start `s` and duration `d` spans
/// `[s + d*i/n, s + d*min(i+k, n)/n)`. Segments without words or with a
/// non-positive duration are dropped.
pub fn normalize_segments(segments: &[TranscriptSegment], chunk_words: usize) -> Vec<Cue> {
    let k = chunk_words.max(1);
    let mut cues = Vec::new();

    for segment in segments {
        let words: Vec<&str> = segment.text.split_whitespace().collect();
        let n = words.len();
        let duration = segment.duration();

        if n == 0 || !(duration > 0.0) {
            continue;
        }

        for (chunk_idx, chunk) in words.chunks(k).enumerate() {
            let first = chunk_idx * k;
            let last = (first + k).min(n);
            let start = segment.start + duration * first as f64 / n as f64;
            let end = segment.start + duration * last as f64 / n as f64;
            cues.push(Cue::new(cues.len() as u32 + 1, start, end, chunk.join(" ")));
        }
    }

    cues
}
