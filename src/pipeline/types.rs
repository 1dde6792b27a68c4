//! Pipeline types
//!
//! Reporting types for a pipeline run.

use crate::types::{Artifact, TaskId};
use serde::Serialize;

/// Outcome of one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    /// Which task ran
    pub task: TaskId,
    /// Attempts made, including the successful one
    pub attempts: u32,
    /// Wall time across all attempts, in milliseconds
    pub duration_ms: u64,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// The snapshot file that was validated and uploaded
    pub artifact: Artifact,
    /// Full destination URL, e.g. `s3://bucket/raw/api_snapshot_...parquet`
    pub destination: String,
    /// Per-task outcomes in execution order
    pub tasks: Vec<TaskReport>,
    /// Total run time in milliseconds
    pub duration_ms: u64,
}

impl RunReport {
    /// Attempts made by a task, if it ran
    pub fn attempts(&self, task: TaskId) -> Option<u32> {
        self.tasks
            .iter()
            .find(|report| report.task == task)
            .map(|report| report.attempts)
    }
}
