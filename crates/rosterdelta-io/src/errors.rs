//! Error handling for rosterdelta-io
//!
//! Wraps rosterdelta-core ExError with file-level helpers

use rosterdelta_core::errors::{DeltaError, ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an input read error for `path`
pub fn input_read(path: &Path, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::InputRead)
        .with_op("read_table")
        .with_path(path.display().to_string())
        .with_message(format!("Failed to read snapshot: {}", reason))
}

/// Create an output write error for `path`
pub fn output_write(path: &Path, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::OutputWrite)
        .with_op("write_table")
        .with_path(path.display().to_string())
        .with_message(format!("Failed to write delta: {}", reason))
}

/// Reject a delimiter the csv crate cannot use
pub fn invalid_delimiter(delimiter: char) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("csv_options")
        .with_message(format!(
            "Delimiter '{}' must be a single ASCII character",
            delimiter.escape_default()
        ))
}

/// Convert a table-model error raised while loading `path`
pub fn from_model(path: &Path, err: DeltaError) -> ExError {
    ExError::from(err)
        .with_op("read_table")
        .with_path(path.display().to_string())
}
