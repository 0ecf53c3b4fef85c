//! Planning job description and input loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use vclip_models::{
    Cue, FaceAnalysis, FramingOptions, Highlight, HighlightsResponse, QualityOptions, SourceFrame,
    SubtitleStyleOverrides, TranscriptPayload,
};
use vclip_planner::{normalize, parse_srt, NormalizerConfig};

use crate::error::{WorkerError, WorkerResult};

/// A planning job as read from a job file.
///
/// Relative input paths are resolved against the job file's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanJob {
    /// Transcript JSON payload or `.srt` file
    pub transcript_path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces_path: Option<PathBuf>,

    pub highlights_path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<SourceFrame>,

    #[serde(default)]
    pub quality: QualityOptions,

    #[serde(default)]
    pub subtitle_style: SubtitleStyleOverrides,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framing: Option<FramingOptions>,
}

/// Highlights files carry either the model response or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum HighlightsFile {
    Response(HighlightsResponse),
    List(Vec<Highlight>),
}

impl PlanJob {
    /// Read a job file.
    pub async fn load(path: &Path) -> WorkerResult<Self> {
        let raw = read_input(path).await?;
        let mut job: PlanJob =
            serde_json::from_str(&raw).map_err(|e| WorkerError::unreadable(path, e))?;

        if let Some(frame) = job.frame.filter(|f| !f.is_usable()) {
            return Err(WorkerError::invalid_input(format!(
                "{}: source frame {}x{} is too small to crop",
                path.display(),
                frame.width,
                frame.height
            )));
        }

        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }
        Ok(job)
    }

    /// Make relative input paths absolute under `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.transcript_path);
        resolve(&mut self.highlights_path);
        if let Some(faces) = self.faces_path.as_mut() {
            resolve(faces);
        }
    }

    /// Load and normalize the transcript into source-time cues.
    pub async fn load_cues(&self, normalizer: &NormalizerConfig) -> WorkerResult<Vec<Cue>> {
        let path = &self.transcript_path;
        let raw = read_input(path).await?;

        let cues = if is_srt(path) {
            parse_srt(&raw)?
        } else {
            let payload: TranscriptPayload =
                serde_json::from_str(&raw).map_err(|e| WorkerError::unreadable(path, e))?;
            if payload.is_empty() {
                return Err(WorkerError::invalid_input(format!(
                    "{}: transcript has neither words nor segments",
                    path.display()
                )));
            }
            normalize(&payload, normalizer)
        };

        debug!(path = %path.display(), cues = cues.len(), "Loaded transcript");
        Ok(cues)
    }

    /// Load the face analysis, or an empty one when the job has none.
    pub async fn load_faces(&self) -> WorkerResult<FaceAnalysis> {
        let Some(path) = &self.faces_path else {
            return Ok(FaceAnalysis::default());
        };
        let raw = read_input(path).await?;
        serde_json::from_str(&raw).map_err(|e| WorkerError::unreadable(path, e))
    }

    pub async fn load_highlights(&self) -> WorkerResult<Vec<Highlight>> {
        let path = &self.highlights_path;
        let raw = read_input(path).await?;
        let file: HighlightsFile =
            serde_json::from_str(&raw).map_err(|e| WorkerError::unreadable(path, e))?;
        Ok(match file {
            HighlightsFile::Response(response) => response.clips,
            HighlightsFile::List(clips) => clips,
        })
    }
}

fn is_srt(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("srt"))
}

async fn read_input(path: &Path) -> WorkerResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| WorkerError::unreadable(path, e))
}
