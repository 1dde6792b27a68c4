//! Tests for the data-quality gate

use super::*;
use crate::output::{json_to_arrow, write_batch_to_parquet, CompressionCodec};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::tempdir;
use test_case::test_case;

fn post(id: Value) -> Value {
    json!({"userId": 1, "id": id, "title": "title", "body": "body"})
}

fn posts(count: i64) -> Vec<Value> {
    (1..=count).map(|id| post(json!(id))).collect()
}

fn validate(records: &[Value]) -> ValidationResult {
    let batch = json_to_arrow(records, None).unwrap();
    Validator::default().validate(&batch).unwrap()
}

// ============================================================================
// Rules
// ============================================================================

#[test]
fn test_valid_batch_of_100() {
    assert_eq!(validate(&posts(100)), ValidationResult::Valid);
}

#[test]
fn test_empty_batch() {
    assert_eq!(
        validate(&[]),
        ValidationResult::Invalid(ValidationError::EmptyBatch)
    );
}

#[test]
fn test_missing_body_column() {
    let records = vec![
        json!({"userId": 1, "id": 1, "title": "a"}),
        json!({"userId": 1, "id": 2, "title": "b"}),
    ];

    assert_eq!(
        validate(&records),
        ValidationResult::Invalid(ValidationError::MissingColumns(vec!["body".to_string()]))
    );
}

#[test]
fn test_missing_columns_follow_declaration_order() {
    // Both userId and body are absent; report follows the required list
    let records = vec![json!({"title": "a", "id": 1})];

    assert_eq!(
        validate(&records),
        ValidationResult::Invalid(ValidationError::MissingColumns(vec![
            "userId".to_string(),
            "body".to_string(),
        ]))
    );
}

#[test]
fn test_null_key() {
    let mut records = posts(10);
    records[4] = post(Value::Null);

    assert_eq!(
        validate(&records),
        ValidationResult::Invalid(ValidationError::NullKey {
            column: "id".to_string()
        })
    );
}

#[test]
fn test_absent_key_is_null() {
    let mut records = posts(3);
    records.push(json!({"userId": 1, "title": "t", "body": "b"}));

    assert_eq!(
        validate(&records),
        ValidationResult::Invalid(ValidationError::NullKey {
            column: "id".to_string()
        })
    );
}

#[test]
fn test_all_null_keys() {
    let records = vec![post(Value::Null), post(Value::Null)];

    assert_eq!(
        validate(&records),
        ValidationResult::Invalid(ValidationError::NullKey {
            column: "id".to_string()
        })
    );
}

#[test]
fn test_duplicate_key() {
    let records = vec![post(json!(7)), post(json!(8)), post(json!(7))];

    assert_eq!(
        validate(&records),
        ValidationResult::Invalid(ValidationError::DuplicateKey {
            column: "id".to_string()
        })
    );
}

#[test]
fn test_duplicate_string_keys() {
    let rules = ValidationRules::new(["sku", "name"], "sku");
    let records = vec![
        json!({"sku": "A-1", "name": "first"}),
        json!({"sku": "A-1", "name": "second"}),
    ];
    let batch = json_to_arrow(&records, None).unwrap();

    let result = Validator::new(rules).validate(&batch).unwrap();
    assert_eq!(
        result,
        ValidationResult::Invalid(ValidationError::DuplicateKey {
            column: "sku".to_string()
        })
    );
}

// ============================================================================
// Rule Order
// ============================================================================

#[test_case(vec![json!({"userId": 1, "id": null, "title": "t"})], "missing columns" ; "missing columns before null key")]
#[test_case(vec![json!({"userId": 1, "id": 1, "title": "t"}), json!({"userId": 1, "id": 1, "title": "t"})], "missing columns" ; "missing columns before duplicate key")]
#[test_case(vec![post(Value::Null), post(json!(2)), post(json!(2))], "null values" ; "null key before duplicate key")]
fn test_first_failing_rule_wins(records: Vec<Value>, expected: &str) {
    let result = validate(&records);
    let message = result.error().unwrap().to_string();
    assert!(message.contains(expected), "got: {message}");
}

#[test]
fn test_validation_is_idempotent() {
    let mut records = posts(5);
    records.push(post(json!(3)));
    let batch = json_to_arrow(&records, None).unwrap();
    let validator = Validator::default();

    let first = validator.validate(&batch).unwrap();
    let second = validator.validate(&batch).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_no_memory_across_batches() {
    let validator = Validator::default();
    let batch = json_to_arrow(&posts(3), None).unwrap();

    assert!(validator.validate(&batch).unwrap().is_valid());
    assert!(validator.validate(&batch).unwrap().is_valid());
}

// ============================================================================
// Multiple Batches & Files
// ============================================================================

#[test]
fn test_validate_batches_detects_duplicates_across_row_groups() {
    let first = json_to_arrow(&[post(json!(1)), post(json!(2))], None).unwrap();
    let second = json_to_arrow(&[post(json!(2))], Some(first.schema().as_ref())).unwrap();

    let result = Validator::default()
        .validate_batches(&[first, second])
        .unwrap();
    assert!(matches!(
        result,
        ValidationResult::Invalid(ValidationError::DuplicateKey { .. })
    ));
}

#[test]
fn test_validate_batches_empty_slice() {
    let result = Validator::default().validate_batches(&[]).unwrap();
    assert_eq!(result, ValidationResult::Invalid(ValidationError::EmptyBatch));
}

#[test]
fn test_validate_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("posts.parquet");
    let batch = json_to_arrow(&posts(100), None).unwrap();
    write_batch_to_parquet(&path, &batch, CompressionCodec::Snappy).unwrap();

    let result = Validator::default().validate_file(&path).unwrap();
    assert!(result.is_valid());
}

#[test]
fn test_validate_file_with_duplicates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dupes.parquet");
    let batch = json_to_arrow(&[post(json!(7)), post(json!(7))], None).unwrap();
    write_batch_to_parquet(&path, &batch, CompressionCodec::Snappy).unwrap();

    let result = Validator::default().validate_file(&path).unwrap();
    assert_eq!(
        result.error().unwrap().to_string(),
        "Data quality failed: duplicate ids in this batch"
    );
}

#[test]
fn test_validate_missing_file() {
    let dir = tempdir().unwrap();
    let result = Validator::default().validate_file(dir.path().join("nope.parquet"));
    assert!(matches!(result, Err(crate::Error::FileNotFound { .. })));
}

// ============================================================================
// Result Conversion
// ============================================================================

#[test]
fn test_into_result() {
    assert!(ValidationResult::Valid.into_result().is_ok());

    let err = ValidationResult::Invalid(ValidationError::MissingColumns(vec![
        "body".to_string(),
    ]))
    .into_result()
    .unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Validation);
    assert_eq!(
        err.to_string(),
        r#"Data quality failed: missing columns ["body"]"#
    );
}

#[test]
fn test_default_rules_are_posts() {
    let rules = ValidationRules::default();
    let expected: Vec<String> = POST_COLUMNS.iter().map(ToString::to_string).collect();
    assert_eq!(rules.required_columns, expected);
    assert_eq!(rules.key_column, POST_KEY_COLUMN.to_string());
}

#[test]
fn test_rules_columns_append_unlisted_key() {
    assert_eq!(ValidationRules::posts().columns(), vec!["userId", "id", "title", "body"]);

    let rules = ValidationRules::new(["name"], "sku");
    assert_eq!(rules.columns(), vec!["name", "sku"]);
}

#[test]
fn test_mixed_type_ids_compare_as_text() {
    // An id column holding both 7 and "7" is widened to Utf8
    let result = validate(&[post(json!(7)), post(json!("7"))]);
    assert_eq!(
        result,
        ValidationResult::Invalid(ValidationError::DuplicateKey {
            column: "id".to_string()
        })
    );

    let result = validate(&[post(json!(7)), post(json!("seven"))]);
    assert_eq!(result, ValidationResult::Valid);
}
