//! Data-quality gate types
//!
//! Rules, outcomes, and failure reasons for batch validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Columns every post record must carry, in declaration order
pub const POST_COLUMNS: [&str; 4] = ["userId", "id", "title", "body"];

/// Primary key of a post record
pub const POST_KEY_COLUMN: &str = "id";

/// What the gate checks a batch against
///
/// Substituting the rules lets the same gate validate a different record
/// shape without touching rule logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Column names that must be present, in reporting order
    pub required_columns: Vec<String>,
    /// Column whose values must be non-null and unique within a batch
    pub key_column: String,
}

impl ValidationRules {
    /// Create rules from a column list and key column
    pub fn new<I, S>(required_columns: I, key_column: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_columns: required_columns.into_iter().map(Into::into).collect(),
            key_column: key_column.into(),
        }
    }

    /// Rules for the posts endpoint
    pub fn posts() -> Self {
        Self::new(POST_COLUMNS, POST_KEY_COLUMN)
    }

    /// Every column the rules name: the required ones, then the key if unlisted
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.required_columns.iter().map(String::as_str).collect();
        if !columns.contains(&self.key_column.as_str()) {
            columns.push(&self.key_column);
        }
        columns
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::posts()
    }
}

/// Why a batch was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The batch has zero rows
    #[error("Data quality failed: file has 0 rows")]
    EmptyBatch,

    /// Required columns are absent, listed in declaration order
    #[error("Data quality failed: missing columns {0:?}")]
    MissingColumns(Vec<String>),

    /// At least one row has a null or absent key
    #[error("Data quality failed: null values in {column}")]
    NullKey { column: String },

    /// At least two rows share a key value
    #[error("Data quality failed: duplicate {column}s in this batch")]
    DuplicateKey { column: String },
}

/// Outcome of running the gate over one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every rule passed
    Valid,
    /// The first rule that failed
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Whether the batch passed
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure reason, if any
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Convert into a crate result, failing on `Invalid`
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(e) => Err(e.into()),
        }
    }
}

