//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::pipeline::{Pipeline, RunReport};
use crate::types::Artifact;
use crate::upload::Uploader;
use crate::validate::Validator;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.cli.pipeline_config()?;

        match &self.cli.command {
            Commands::Run => self.run_pipeline(config).await,
            Commands::Extract => self.extract(config).await,
            Commands::Validate { file } => self.validate(&config, file),
            Commands::Upload { file } => self.upload(config, file).await,
        }
    }

    /// Full extract → validate → upload run
    async fn run_pipeline(&self, config: PipelineConfig) -> Result<()> {
        let report = Pipeline::new(config)?.run().await?;
        println!("{}", render_report(&report)?);
        Ok(())
    }

    /// Write a snapshot and print its path
    async fn extract(&self, config: PipelineConfig) -> Result<()> {
        let artifact = Pipeline::new(config)?.extract().await?;
        println!("{}", artifact.path.display());
        Ok(())
    }

    /// Check an existing file
    fn validate(&self, config: &PipelineConfig, file: &Path) -> Result<()> {
        Validator::new(config.rules.clone())
            .validate_file(file)?
            .into_result()?;
        println!("OK {}", file.display());
        Ok(())
    }

    /// Upload an existing file
    async fn upload(&self, config: PipelineConfig, file: &Path) -> Result<()> {
        let artifact = Artifact::from_path(file)?;
        let destination = Uploader::new(config.store).upload_artifact(&artifact).await?;
        println!("{destination}");
        Ok(())
    }
}

/// Render a run report as one line of JSON
pub(crate) fn render_report(report: &RunReport) -> Result<String> {
    serde_json::to_string(report)
        .map_err(|e| Error::serialization(format!("Failed to encode run report: {e}")))
}
