//! Data-quality gate
//!
//! Binary pass/fail check applied to a batch before it is uploaded.
//!
//! # Rules
//!
//! Evaluated in order, stopping at the first failure:
//!
//! 1. The batch has at least one row
//! 2. Every required column is present
//! 3. No row has a null key
//! 4. No two rows share a key
//!
//! ```rust,ignore
//! use api_snapshot::validate::Validator;
//!
//! let result = Validator::default().validate_file("api_snapshot_20240101T000000.parquet")?;
//! result.into_result()?;
//! ```

mod types;
mod validator;

pub use types::{
    ValidationError, ValidationResult, ValidationRules, POST_COLUMNS, POST_KEY_COLUMN,
};
pub use validator::Validator;

#[cfg(test)]
mod tests;
