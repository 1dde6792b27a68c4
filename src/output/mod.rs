//! Output module
//!
//! Handles Arrow RecordBatch creation and Parquet file writing.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Inferring Arrow schemas from JSON records
//! - Converting JSON to Arrow RecordBatches
//! - Writing timestamped Parquet snapshot files
//! - Reading Parquet files back for validation

mod schema;
mod writer;

pub use schema::{infer_schema, json_to_arrow, text_schema};
pub use writer::{
    read_parquet_file, snapshot_file_name, write_batch_to_parquet, write_snapshot,
    write_snapshot_at, CompressionCodec, SNAPSHOT_PREFIX, SNAPSHOT_TIMESTAMP_FORMAT,
};
