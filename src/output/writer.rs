//! Parquet file writer and reader
//!
//! Writes Arrow RecordBatches to Parquet files and reads them back.

use crate::error::{Error, Result};
use crate::types::Artifact;
use arrow::compute::concat_batches;
use arrow::record_batch::{RecordBatch, RecordBatchReader};
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// File name prefix of every snapshot artifact
pub const SNAPSHOT_PREFIX: &str = "api_snapshot_";

/// Timestamp layout embedded in snapshot file names
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Block compression codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionCodec {
    /// No compression
    Uncompressed,
    /// Snappy (the default)
    #[default]
    Snappy,
    /// ZSTD at the default level
    Zstd,
    /// GZIP at the default level
    Gzip,
}

impl From<CompressionCodec> for Compression {
    fn from(codec: CompressionCodec) -> Self {
        match codec {
            CompressionCodec::Uncompressed => Compression::UNCOMPRESSED,
            CompressionCodec::Snappy => Compression::SNAPPY,
            CompressionCodec::Zstd => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            CompressionCodec::Gzip => Compression::GZIP(parquet::basic::GzipLevel::default()),
        }
    }
}

impl CompressionCodec {
    /// Parquet writer properties using this codec
    pub fn writer_properties(self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.into())
            .build()
    }
}

/// Write a single RecordBatch to a Parquet file
///
/// Returns the number of rows written.
pub fn write_batch_to_parquet(
    path: impl AsRef<Path>,
    batch: &RecordBatch,
    compression: CompressionCodec,
) -> Result<usize> {
    let file = File::create(path.as_ref())?;
    let props = compression.writer_properties();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props)).map_err(|e| {
        Error::serialization(format!("Failed to create Parquet writer: {e}"))
    })?;
    writer
        .write(batch)
        .map_err(|e| Error::serialization(format!("Failed to write batch: {e}")))?;
    writer
        .close()
        .map_err(|e| Error::serialization(format!("Failed to close Parquet writer: {e}")))?;

    Ok(batch.num_rows())
}

/// Build the artifact file name for a snapshot taken at `at`
///
/// Format: `api_snapshot_{YYYYMMDDTHHMMSS}.parquet`
pub fn snapshot_file_name(at: DateTime<Utc>) -> String {
    format!(
        "{SNAPSHOT_PREFIX}{}.parquet",
        at.format(SNAPSHOT_TIMESTAMP_FORMAT)
    )
}

/// Write a batch as a timestamped snapshot file in `dir`
pub fn write_snapshot(
    dir: impl AsRef<Path>,
    batch: &RecordBatch,
    compression: CompressionCodec,
) -> Result<Artifact> {
    write_snapshot_at(dir, batch, compression, Utc::now())
}

/// Write a batch as a snapshot file named after `at`
pub fn write_snapshot_at(
    dir: impl AsRef<Path>,
    batch: &RecordBatch,
    compression: CompressionCodec,
    at: DateTime<Utc>,
) -> Result<Artifact> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let file_name = snapshot_file_name(at);
    let path = dir.join(&file_name);
    info!("Writing {} ...", path.display());

    let rows = write_batch_to_parquet(&path, batch, compression)?;
    debug!("Wrote {rows} rows with {compression:?}");

    Ok(Artifact {
        path,
        file_name,
        rows,
    })
}

/// Read a Parquet file into a single RecordBatch
///
/// Row groups are concatenated; a file with no rows yields an empty batch
/// carrying the file schema.
pub fn read_parquet_file(path: impl AsRef<Path>) -> Result<RecordBatch> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let schema = reader.schema();
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(concat_batches(&schema, &batches)?)
}
