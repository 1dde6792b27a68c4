//! # api-snapshot
//!
//! A scheduled snapshot task: fetch a JSON array from an HTTP API, write it
//! as a Snappy-compressed Parquet file, run a data-quality gate over the
//! file, and upload it to an S3 bucket.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use api_snapshot::{config::PipelineConfig, pipeline::Pipeline, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut config = PipelineConfig::default();
//!     config.store.bucket = Some("my-bucket".to_string());
//!
//!     let report = Pipeline::new(config)?.run().await?;
//!     println!("uploaded {}", report.destination);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │        extract        │   │   validate   │   │    upload    │
//! │ fetch → json_to_arrow │──▶│ 1. non-empty │──▶│ s3://bucket/ │
//! │ → write_snapshot      │   │ 2. columns   │   │ raw/<file>   │
//! └───────────────────────┘   │ 3. null key  │   └──────────────┘
//!            │                │ 4. dup key   │          ▲
//!            │                └──────────────┘          │
//!            └──────────────── Artifact ────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pipeline configuration
pub mod config;

/// HTTP client
pub mod http;

/// Source API fetcher
pub mod fetch;

/// Arrow/Parquet output
pub mod output;

/// Data-quality gate
pub mod validate;

/// Object store upload
pub mod upload;

/// Task orchestration
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::{Artifact, TaskId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
