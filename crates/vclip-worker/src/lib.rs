//! Clip planning worker.
//!
//! This crate provides:
//! - Job loading (JSON or SRT transcripts, face analysis, highlights)
//! - Batch planning on the blocking pool
//! - A TTL session store for planned batches
//! - Environment-driven configuration, structured logging and metrics

pub mod config;
pub mod error;
pub mod executor;
pub mod job;
pub mod logging;
pub mod metrics;
pub mod session;

pub use config::PlannerWorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use executor::{PlanExecutor, PlanOutcome};
pub use job::PlanJob;
pub use logging::JobLogger;
pub use session::{SessionEntry, SessionId, SessionStore};
