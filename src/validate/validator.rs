//! Batch validator
//!
//! Applies the four data-quality rules in a fixed order and stops at the
//! first failure, so the reported reason is deterministic.

use super::types::{ValidationError, ValidationResult, ValidationRules};
use crate::error::Result;
use crate::output::read_parquet_file;
use arrow::array::{Array, ArrayRef};
use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use arrow::row::{RowConverter, SortField};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Data-quality gate for a single batch
///
/// Stateless: uniqueness is only checked within the batch being validated.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    /// Create a validator with the given rules
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Get the rules
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate an in-memory batch
    ///
    /// Only fails when the key column cannot be row-encoded for comparison.
    pub fn validate(&self, batch: &RecordBatch) -> Result<ValidationResult> {
        let result = self.check(batch)?;
        debug!("Validated {} rows: {:?}", batch.num_rows(), result);
        Ok(result)
    }

    /// Validate several batches sharing one schema as a single batch
    pub fn validate_batches(&self, batches: &[RecordBatch]) -> Result<ValidationResult> {
        let Some(first) = batches.first() else {
            return Ok(ValidationResult::Invalid(ValidationError::EmptyBatch));
        };
        let combined = concat_batches(&first.schema(), batches)?;
        self.validate(&combined)
    }

    /// Read a Parquet artifact and validate its contents
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<ValidationResult> {
        let path = path.as_ref();
        let batch = read_parquet_file(path)?;
        let result = self.validate(&batch)?;
        match &result {
            ValidationResult::Valid => {
                info!("Data quality passed for {} ({} rows)", path.display(), batch.num_rows());
            }
            ValidationResult::Invalid(reason) => info!("{reason} ({})", path.display()),
        }
        Ok(result)
    }

    fn check(&self, batch: &RecordBatch) -> Result<ValidationResult> {
        if batch.num_rows() == 0 {
            return Ok(ValidationResult::Invalid(ValidationError::EmptyBatch));
        }

        let schema = batch.schema();
        let missing: Vec<String> = self
            .rules
            .required_columns
            .iter()
            .filter(|name| schema.index_of(name).is_err())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Ok(ValidationResult::Invalid(ValidationError::MissingColumns(
                missing,
            )));
        }

        let key_column = &self.rules.key_column;

        // A key column that is not required and not present is absent on every row.
        let Some(keys) = batch.column_by_name(key_column) else {
            return Ok(ValidationResult::Invalid(ValidationError::NullKey {
                column: key_column.clone(),
            }));
        };

        if has_nulls(keys.as_ref()) {
            return Ok(ValidationResult::Invalid(ValidationError::NullKey {
                column: key_column.clone(),
            }));
        }

        if has_duplicates(keys)? {
            return Ok(ValidationResult::Invalid(ValidationError::DuplicateKey {
                column: key_column.clone(),
            }));
        }

        Ok(ValidationResult::Valid)
    }
}

/// Check for logical nulls (a `Null`-typed column is null on every row)
fn has_nulls(array: &dyn Array) -> bool {
    array
        .logical_nulls()
        .is_some_and(|nulls| nulls.null_count() > 0)
}

/// Check whether any two values in the column are equal
fn has_duplicates(column: &ArrayRef) -> Result<bool> {
    let converter = RowConverter::new(vec![SortField::new(column.data_type().clone())])?;
    let rows = converter.convert_columns(std::slice::from_ref(column))?;

    let mut seen = HashSet::with_capacity(rows.num_rows());
    Ok(rows.iter().any(|row| !seen.insert(row)))
}
