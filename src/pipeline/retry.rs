//! Task-level retry
//!
//! A failed task is re-run after a fixed delay, up to the policy's retry
//! count. There is no backoff escalation.

use super::types::TaskReport;
use crate::config::RetryPolicy;
use crate::error::Result;
use crate::types::TaskId;
use std::future::Future;
use std::time::Instant;
use tracing::{info, warn};

/// Run `task` under `policy`, returning its output and a report
///
/// The last error is returned once every attempt has failed.
pub async fn run_task<T, F, Fut>(
    task: TaskId,
    policy: &RetryPolicy,
    mut f: F,
) -> Result<(T, TaskReport)>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let max_attempts = policy.retries + 1;
    let mut attempt = 1;

    loop {
        info!(task = %task, attempt, "Starting task");

        match f().await {
            Ok(output) => {
                let report = TaskReport {
                    task,
                    attempts: attempt,
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                info!(task = %task, attempt, "Task succeeded");
                return Ok((output, report));
            }
            Err(e) if attempt < max_attempts => {
                warn!(
                    task = %task,
                    "Task failed (attempt {}/{}): {}; retrying in {:?}",
                    attempt,
                    max_attempts,
                    e,
                    policy.delay()
                );
                tokio::time::sleep(policy.delay()).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(task = %task, "Task failed after {} attempt(s): {}", attempt, e);
                return Err(e);
            }
        }
    }
}
