#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::table;
use rosterdelta_core::delta::compute_delta;
use rosterdelta_core::errors::DeltaError;
use rosterdelta_core::logging_facility::test_capture::init_test_capture;
use rosterdelta_core::{log_op_end, log_op_error, log_op_start, DeltaConfig};
use rosterdelta_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, latest_rows = 12);

    let start = capture
        .last_event(op_name, EVENT_START)
        .expect("Should have captured a start event");
    assert_eq!(start.field("latest_rows"), Some("12"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });
    assert_eq!(ends, 1, "Should have exactly one end event");
    assert_eq!(
        capture
            .last_event(op_name, EVENT_END)
            .unwrap()
            .field("duration_ms"),
        Some("42")
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DeltaError::InvalidConfig {
        reason: "bad".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let event = capture
        .last_event(op_name, EVENT_END_ERROR)
        .expect("Should have error event");
    assert_eq!(event.field("err_code"), Some("ERR_INVALID_CONFIG"));
    assert_eq!(event.level, tracing::Level::ERROR);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

// The engine logs under a fixed op name, so these assertions look for the
// row counts unique to each test rather than counting events.

#[test]
fn test_compute_delta_logs_start_and_end_with_counts() {
    let capture = init_test_capture();
    let prior = table(&["id", "city"], &[&["1", "X"]]);
    let latest = table(
        &["id", "city"],
        &[&["1", "Y"], &["2", "X"], &["3", "X"], &["4", "X"], &["5", "X"], &["6", "X"], &["7", "X"]],
    );

    compute_delta(&prior, &latest, &DeltaConfig::keyed_on("id")).unwrap();

    let start = capture
        .events_for_op("compute_delta")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_START) && e.field("latest_rows") == Some("7"));
    assert!(start.is_some(), "compute_delta start event not captured");

    let end = capture
        .events_for_op("compute_delta")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END) && e.field("output_rows") == Some("7"))
        .expect("compute_delta end event not captured");
    assert_eq!(end.field("new"), Some("6"));
    assert_eq!(end.field("changed"), Some("1"));
}

#[test]
fn test_compute_delta_logs_error_code_on_duplicate_key() {
    let capture = init_test_capture();
    let prior = table(&["id", "city"], &[&["9", "X"], &["9", "Y"]]);
    let latest = table(&["id", "city"], &[]);

    compute_delta(&prior, &latest, &DeltaConfig::keyed_on("id")).unwrap_err();

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some("compute_delta")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err_code") == Some("ERR_DUPLICATE_KEY")
    });
    assert!(found >= 1);
}

#[test]
fn test_unknown_exempt_column_warned() {
    let capture = init_test_capture();
    let prior = table(&["id", "city"], &[]);
    let latest = table(&["id", "city"], &[]);
    let config = DeltaConfig::keyed_on("id").with_exempt(["nickname_unique_42"]);

    compute_delta(&prior, &latest, &config).unwrap();

    let warned = capture.count_events(|e| {
        e.level == tracing::Level::WARN && e.field("column") == Some("nickname_unique_42")
    });
    assert_eq!(warned, 1);
}
