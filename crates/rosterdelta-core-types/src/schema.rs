//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the logging macros,
//! the engine and the test capture assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Delta identifiers
pub const FIELD_KEY: &str = "key";
pub const FIELD_COLUMN: &str = "column";
pub const FIELD_TABLE: &str = "table";

// Collection sizes
pub const FIELD_PRIOR_ROWS: &str = "prior_rows";
pub const FIELD_LATEST_ROWS: &str = "latest_rows";
pub const FIELD_OUTPUT_ROWS: &str = "output_rows";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
