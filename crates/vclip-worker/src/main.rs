//! Clip planning worker binary.
//!
//! Usage: `vclip-planner <job.json>`. The planned batch is printed to stdout
//! as JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vclip_worker::{PlanExecutor, PlannerWorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("vclip=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let job_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: vclip-planner <job.json>")?;

    info!("Starting vclip-planner");

    let config = PlannerWorkerConfig::from_env();
    info!("Planner config: {:?}", config);

    let executor = PlanExecutor::new(config.clone());
    let sweeper = executor.sessions().spawn_sweeper(config.sweep_interval);

    let outcome = match executor.execute_file(&job_path).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Job failed: {}", e);
            sweeper.abort();
            return Err(e).with_context(|| format!("planning job {}", job_path.display()));
        }
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    sweeper.abort();
    info!(
        session_id = %outcome.session_id,
        planned = outcome.batch.plans.len(),
        failed = outcome.batch.failures.len(),
        "Planner shutdown complete"
    );

    Ok(())
}
