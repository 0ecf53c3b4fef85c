//! Job executor: loads a job's inputs, plans the batch off the async
//! runtime, and stores the result as a session.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{Instrument, Span};

use vclip_models::{BatchPlan, FramingOptions};
use vclip_planner::{ClipPlanner, PlanningInputs};

use crate::config::PlannerWorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::job::PlanJob;
use crate::logging::JobLogger;
use crate::metrics;
use crate::session::{SessionId, SessionStore};

/// Result of one executed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub session_id: SessionId,
    pub batch: BatchPlan,
}

/// Plans jobs and keeps their results for the session TTL.
#[derive(Debug, Clone)]
pub struct PlanExecutor {
    config: PlannerWorkerConfig,
    planner: ClipPlanner,
    sessions: SessionStore<BatchPlan>,
}

impl PlanExecutor {
    pub fn new(config: PlannerWorkerConfig) -> Self {
        Self {
            planner: ClipPlanner::new(config.planner_config()),
            sessions: SessionStore::new(config.session_ttl),
            config,
        }
    }

    pub fn config(&self) -> &PlannerWorkerConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore<BatchPlan> {
        &self.sessions
    }

    /// Load and execute a job file.
    pub async fn execute_file(&self, path: &Path) -> WorkerResult<PlanOutcome> {
        let job = PlanJob::load(path).await?;
        self.execute(job).await
    }

    /// Execute a job whose paths are already resolved.
    ///
    /// Fails only when the job's inputs cannot be loaded; clip-level
    /// failures are reported inside the batch.
    pub async fn execute(&self, job: PlanJob) -> WorkerResult<PlanOutcome> {
        let session_id = SessionId::new();
        let logger = JobLogger::new(&session_id, "plan_batch");
        let span = logger.create_span();

        self.run(session_id, &logger, job).instrument(span).await
    }

    async fn run(
        &self,
        session_id: SessionId,
        logger: &JobLogger,
        job: PlanJob,
    ) -> WorkerResult<PlanOutcome> {
        let started = Instant::now();

        logger.log_start(&format!("transcript {}", job.transcript_path.display()));

        let (inputs, highlights) = match self.load_inputs(&job).await {
            Ok(loaded) => loaded,
            Err(e) => {
                logger.log_error(&e.to_string());
                return Err(e);
            }
        };

        logger.log_progress(&format!(
            "planning {} highlights over {} cues",
            highlights.len(),
            inputs.cues.len()
        ));

        let planner = self.planner.clone();
        let span = Span::current();
        let batch = tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            planner.plan_batch(&inputs, &highlights)
        })
        .await
        .map_err(|e| WorkerError::Join(e.to_string()))?;

        metrics::record_batch(batch.plans.len(), batch.failures.len(), started.elapsed());

        if !batch.is_complete_success() {
            logger.log_warning(&format!("{} of {} clips failed", batch.failures.len(), batch.total()));
        }

        self.sessions.insert(session_id, batch.clone()).await;

        logger.log_completion(&format!("{} clips planned", batch.plans.len()));

        Ok(PlanOutcome { session_id, batch })
    }

    /// Fetch a stored batch.
    pub async fn session(&self, id: &SessionId) -> WorkerResult<BatchPlan> {
        let batch = self.sessions.require(id).await?;
        Ok((*batch).clone())
    }

    async fn load_inputs(
        &self,
        job: &PlanJob,
    ) -> WorkerResult<(PlanningInputs, Vec<vclip_models::Highlight>)> {
        let (cues, faces, highlights) = tokio::try_join!(
            job.load_cues(&self.planner.config().normalizer),
            job.load_faces(),
            job.load_highlights(),
        )?;

        let framing = job.framing.clone().unwrap_or_else(|| FramingOptions {
            zoom_policy: self.config.zoom_policy,
            ..Default::default()
        });

        let inputs = PlanningInputs {
            cues,
            faces,
            frame: job.frame.unwrap_or(self.config.frame),
            quality: job.quality.clone(),
            subtitle_style: job.subtitle_style.clone(),
            framing,
        };

        Ok((inputs, highlights))
    }
}
