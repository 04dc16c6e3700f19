use rosterdelta_core::errors::{DeltaError, ExError, ExErrorKind};
use rosterdelta_core::TableRole;
use rosterdelta_core_types::RequestId;

#[test]
fn test_missing_column_maps_to_schema_with_table_identity() {
    let err = DeltaError::MissingColumn {
        column: "employee_number".to_string(),
        table: TableRole::Prior,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Schema);
    assert_eq!(ex_err.code(), "ERR_SCHEMA");
    assert_eq!(ex_err.column(), Some("employee_number"));
    assert_eq!(ex_err.table(), Some(TableRole::Prior));
    assert!(ex_err.message().contains("missing from the prior table"));
}

#[test]
fn test_duplicate_key_distinct_from_invalid_input() {
    let err = DeltaError::DuplicateKey {
        key: "0042".to_string(),
        table: TableRole::Latest,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateKey);
    assert_ne!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.key(), Some("0042"));
    assert_eq!(ex_err.table(), Some(TableRole::Latest));
}

#[test]
fn test_null_key_is_invalid_input() {
    let ex_err: ExError = DeltaError::NullKey {
        table: TableRole::Latest,
        row: 3,
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert!(ex_err.message().contains("Row 3"));
}

#[test]
fn test_invalid_config_conversion() {
    let ex_err: ExError = DeltaError::InvalidConfig {
        reason: "key_column must not be empty".to_string(),
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_INVALID_CONFIG");
    assert!(ex_err.message().contains("key_column must not be empty"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::Schema, "ERR_SCHEMA"),
        (ExErrorKind::DuplicateKey, "ERR_DUPLICATE_KEY"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::InputRead, "ERR_INPUT_READ"),
        (ExErrorKind::OutputWrite, "ERR_OUTPUT_WRITE"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_builder_context_round_trips() {
    let request_id = RequestId::from_string("run-7".to_string());
    let ex_err = ExError::new(ExErrorKind::InputRead)
        .with_op("read_table")
        .with_path("/data/today.csv")
        .with_request_id(request_id.clone())
        .with_message("file not found");

    assert_eq!(ex_err.op(), Some("read_table"));
    assert_eq!(ex_err.path(), Some("/data/today.csv"));
    assert_eq!(ex_err.request_id(), Some(&request_id));

    let text = ex_err.to_string();
    assert!(text.contains("ERR_INPUT_READ"));
    assert!(text.contains("/data/today.csv"));
    assert!(text.contains("run-7"));
}
