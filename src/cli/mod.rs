//! CLI module
//!
//! Command-line interface for the snapshot task.
//!
//! # Commands
//!
//! - `run` - Extract, validate and upload in one go
//! - `extract` - Fetch the API and write a Parquet snapshot
//! - `validate` - Run the data-quality gate on a file
//! - `upload` - Upload a file to the bucket

mod commands;
mod runner;

pub use commands::{Cli, Commands, SettingsArgs};
pub use runner::Runner;
