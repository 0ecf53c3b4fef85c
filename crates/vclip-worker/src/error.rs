//! Worker error types.

use thiserror::Error;

use vclip_planner::PlannerError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Planning error: {0}")]
    Planner(#[from] PlannerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Planning task failed: {0}")]
    Join(String),
}

impl WorkerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn session_not_found(id: impl ToString) -> Self {
        Self::SessionNotFound(id.to_string())
    }

    /// Input file could not be read or decoded.
    pub fn unreadable(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::InvalidInput(format!("{}: {}", path.display(), err))
    }

    /// Check if the error was caused by the job's inputs rather than the worker.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WorkerError::InvalidInput(_) | WorkerError::Planner(_) | WorkerError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_unreadable_includes_path() {
        let err = WorkerError::unreadable(Path::new("/data/faces.json"), "no such file");
        assert_eq!(err.to_string(), "Invalid input: /data/faces.json: no such file");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_planner_errors_convert() {
        let err: WorkerError = PlannerError::srt_parse(3, "bad").into();
        assert!(matches!(err, WorkerError::Planner(_)));
        assert!(!WorkerError::Join("cancelled".into()).is_input_error());
    }
}
