//! Common types used throughout api-snapshot
//!
//! Shared type definitions and aliases used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Artifact
// ============================================================================

/// A snapshot file written by the extract task
///
/// Handed by value to the validate and upload tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Local path of the Parquet file
    pub path: PathBuf,
    /// File name, used as the object key suffix
    pub file_name: String,
    /// Number of rows written
    pub rows: usize,
}

impl Artifact {
    /// Describe a Parquet file that already exists on disk
    ///
    /// The row count is unknown and left at zero. A path without a final
    /// file name component (`..`, `/`) is rejected.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            return Err(Error::config(format!(
                "{} does not name a file",
                path.display()
            )));
        };
        Ok(Self {
            path,
            file_name,
            rows: 0,
        })
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// The three pipeline tasks, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskId {
    /// Fetch records and write the Parquet snapshot
    Extract,
    /// Run the data-quality gate on the snapshot
    Validate,
    /// Upload the snapshot to the object store
    Upload,
}

impl TaskId {
    /// Task name as shown in logs
    pub fn as_str(self) -> &'static str {
        match self {
            TaskId::Extract => "extract",
            TaskId::Validate => "validate",
            TaskId::Upload => "upload",
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_from_path() {
        let artifact =
            Artifact::from_path("/tmp/out/api_snapshot_20240101T000000.parquet").unwrap();
        assert_eq!(artifact.file_name, "api_snapshot_20240101T000000.parquet");
        assert_eq!(artifact.rows, 0);
    }

    #[test]
    fn test_artifact_from_path_without_file_name() {
        for path in ["..", "/", "out/.."] {
            let err = Artifact::from_path(path).unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::Config, "{path}");
        }
    }

    #[test]
    fn test_task_id_display() {
        assert_eq!(TaskId::Extract.to_string(), "extract");
        assert_eq!(TaskId::Validate.to_string(), "validate");
        assert_eq!(TaskId::Upload.to_string(), "upload");
    }

    #[test]
    fn test_task_id_serde() {
        let json = serde_json::to_string(&TaskId::Validate).unwrap();
        assert_eq!(json, "\"validate\"");
    }
}
