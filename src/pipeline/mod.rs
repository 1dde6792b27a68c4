//! Pipeline module
//!
//! Runs the three tasks in order: `extract`, `validate`, `upload`.
//!
//! # Overview
//!
//! - `extract` fetches the records and writes a timestamped Parquet file
//! - `validate` runs the data-quality gate over that file
//! - `upload` copies the file to `{key_prefix}/{file_name}` in the bucket
//!
//! The artifact returned by `extract` is passed directly to the other two
//! tasks. Any task failure (after retries) aborts the run, so a file that
//! fails validation is never uploaded.

mod retry;
mod types;

pub use retry::run_task;
pub use types::{RunReport, TaskReport};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::output::{text_schema, write_snapshot};
use crate::types::{Artifact, TaskId};
use crate::upload::Uploader;
use crate::validate::Validator;
use std::time::Instant;
use tracing::info;

/// The extract → validate → upload pipeline
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Fetcher,
    validator: Validator,
    uploader: Uploader,
}

impl Pipeline {
    /// Create a pipeline from a configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let fetcher = Fetcher::new(&config.fetch)?;
        let validator = Validator::new(config.rules.clone());
        let uploader = Uploader::new(config.store.clone());

        Ok(Self {
            config,
            fetcher,
            validator,
            uploader,
        })
    }

    /// Replace the uploader
    #[must_use]
    pub fn with_uploader(mut self, uploader: Uploader) -> Self {
        self.uploader = uploader;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch the records and write them as a Parquet snapshot
    ///
    /// An empty response is written with the rule columns as Utf8, so the
    /// file exists and the gate reports it as empty.
    pub async fn extract(&self) -> Result<Artifact> {
        let empty_schema = text_schema(self.config.rules.columns());
        let batch = self.fetcher.fetch(&empty_schema).await?;
        write_snapshot(
            &self.config.output.dir,
            &batch,
            self.config.output.compression,
        )
    }

    /// Run the data-quality gate over a snapshot
    pub fn validate(&self, artifact: &Artifact) -> Result<()> {
        self.validator.validate_file(&artifact.path)?.into_result()
    }

    /// Upload a snapshot to the destination bucket
    pub async fn upload(&self, artifact: &Artifact) -> Result<String> {
        self.uploader.upload_artifact(artifact).await
    }

    /// Run all three tasks, each under the retry policy
    pub async fn run(&self) -> Result<RunReport> {
        let start = Instant::now();
        let policy = &self.config.retry;

        let (artifact, extract) = run_task(TaskId::Extract, policy, || self.extract()).await?;
        let artifact_ref = &artifact;
        let ((), validate) = run_task(TaskId::Validate, policy, move || async move {
            self.validate(artifact_ref)
        })
        .await?;
        let (destination, upload) =
            run_task(TaskId::Upload, policy, move || self.upload(artifact_ref)).await?;

        let report = RunReport {
            artifact,
            destination,
            tasks: vec![extract, validate, upload],
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "Run complete: {} rows to {} in {}ms",
            report.artifact.rows, report.destination, report.duration_ms
        );
        Ok(report)
    }
}
