//! Planner metrics collection.
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! these calls are no-ops.

use std::time::Duration;

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Clips planned successfully.
    pub const CLIPS_PLANNED_TOTAL: &str = "vclip_clips_planned_total";

    /// Clips that failed to plan.
    pub const CLIPS_FAILED_TOTAL: &str = "vclip_clips_failed_total";

    /// Sessions removed by the expiry sweep.
    pub const SESSIONS_EXPIRED_TOTAL: &str = "vclip_sessions_expired_total";

    /// Wall time of one batch planning run in seconds.
    pub const PLAN_DURATION_SECONDS: &str = "vclip_plan_duration_seconds";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record the outcome of a batch.
pub fn record_batch(planned: usize, failed: usize, elapsed: Duration) {
    counter!(names::CLIPS_PLANNED_TOTAL).increment(planned as u64);
    counter!(names::CLIPS_FAILED_TOTAL).increment(failed as u64);
    histogram!(names::PLAN_DURATION_SECONDS).record(elapsed.as_secs_f64());
}

/// Record sessions removed by a sweep.
pub fn record_sessions_expired(count: usize) {
    if count > 0 {
        counter!(names::SESSIONS_EXPIRED_TOTAL).increment(count as u64);
    }
}
