//! CLI commands and argument parsing

use crate::config::PipelineConfig;
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Snapshot a JSON API to Parquet, check it, and upload it to S3
#[derive(Parser, Debug)]
#[command(name = "api-snapshot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true, env = "API_SNAPSHOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run extract, validate and upload in order
    Run,

    /// Fetch the API and write a Parquet snapshot
    Extract,

    /// Run the data-quality gate on a Parquet file
    Validate {
        /// Parquet file to check
        file: PathBuf,
    },

    /// Upload a Parquet file to the bucket under the key prefix
    Upload {
        /// Parquet file to upload
        file: PathBuf,
    },
}

/// Settings that override the configuration file
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Source endpoint returning a JSON array
    #[arg(long, global = true, env = "API_URL")]
    pub endpoint: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = "HTTP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory for Parquet snapshots
    #[arg(short, long, global = true, env = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Destination bucket
    #[arg(long, global = true, env = "S3_BUCKET")]
    pub bucket: Option<String>,

    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS access key id
    #[arg(long, global = true, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// AWS secret access key
    #[arg(long, global = true, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Custom S3 endpoint (MinIO, R2, LocalStack)
    #[arg(long, global = true, env = "AWS_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Object key prefix
    #[arg(long, global = true, env = "S3_KEY_PREFIX")]
    pub key_prefix: Option<String>,

    /// Retries per failed task
    #[arg(long, global = true, env = "TASK_RETRIES")]
    pub retries: Option<u32>,

    /// Delay between task retries in seconds
    #[arg(long, global = true, env = "TASK_RETRY_DELAY_SECS")]
    pub retry_delay_secs: Option<u64>,
}

impl SettingsArgs {
    /// Apply every setting that was given on top of `config`
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.fetch.endpoint.clone_from(endpoint);
        }
        if let Some(secs) = self.timeout_secs {
            config.fetch.timeout_secs = secs;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir.clone_from(dir);
        }
        if let Some(bucket) = &self.bucket {
            config.store.bucket = Some(bucket.clone());
        }
        if let Some(region) = &self.region {
            config.store.region.clone_from(region);
        }
        if let Some(key_id) = &self.access_key_id {
            config.store.access_key_id = Some(key_id.clone());
        }
        if let Some(secret) = &self.secret_access_key {
            config.store.secret_access_key = Some(secret.clone());
        }
        if let Some(endpoint) = &self.s3_endpoint {
            config.store.endpoint = Some(endpoint.clone());
        }
        if let Some(prefix) = &self.key_prefix {
            config.store.key_prefix.clone_from(prefix);
        }
        if let Some(retries) = self.retries {
            config.retry.retries = retries;
        }
        if let Some(delay) = self.retry_delay_secs {
            config.retry.delay_secs = delay;
        }
    }
}

impl Cli {
    /// Build the run configuration: defaults, then the YAML file, then flags/env
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_yaml_file(path)?,
            None => PipelineConfig::default(),
        };
        self.settings.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}
