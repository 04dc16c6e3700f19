use crate::model::TableRole;
use rosterdelta_core_types::RequestId;
use thiserror::Error;

/// Result type alias using DeltaError
pub type Result<T> = std::result::Result<T, DeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers, tests and log
/// consumers can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Schema/Validation
    /// A required column is missing from an input table
    Schema,
    /// A key value repeats within one input table
    DuplicateKey,
    /// Structurally invalid table data (null key, ragged row, repeated header)
    InvalidInput,
    /// Rejected delta configuration
    InvalidConfig,

    // Integration/IO
    /// A snapshot could not be read or parsed
    InputRead,
    /// The delta could not be written
    OutputWrite,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Schema => "ERR_SCHEMA",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::InputRead => "ERR_INPUT_READ",
            ExErrorKind::OutputWrite => "ERR_OUTPUT_WRITE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the context
/// needed to locate the problem: the table, column, key or file involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<TableRole>,
    column: Option<String>,
    key: Option<String>,
    path: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            column: None,
            key: None,
            path: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add table identity context
    pub fn with_table(mut self, table: TableRole) -> Self {
        self.table = Some(table);
        self
    }

    /// Add column context
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the table identity, if any
    pub fn table(&self) -> Option<TableRole> {
        self.table
    }

    /// Get the column context, if any
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Get the key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(table) = self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(column) = &self.column {
            write!(f, " (column: {})", column)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Typed errors raised by the table model, configuration and delta engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    // ===== Schema Errors =====
    /// A required column is absent from one of the input tables
    #[error("Column '{column}' is missing from the {table} table")]
    MissingColumn { column: String, table: TableRole },

    /// The same column name appears twice in one header
    #[error("Column '{column}' appears more than once in the header")]
    DuplicateColumn { column: String },

    // ===== Data Errors =====
    /// A key value repeats within one input table
    #[error("Key '{key}' appears more than once in the {table} table")]
    DuplicateKey { key: String, table: TableRole },

    /// A row has no value in the key column
    #[error("Row {row} of the {table} table has an empty key")]
    NullKey { table: TableRole, row: usize },

    /// A row's width disagrees with the header
    #[error("Row {row} has {found} values but the header has {expected} columns")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    // ===== Configuration Errors =====
    /// Delta configuration rejected by validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<DeltaError> for ExError {
    fn from(err: DeltaError) -> Self {
        let message = err.to_string();
        match err {
            DeltaError::MissingColumn { column, table } => ExError::new(ExErrorKind::Schema)
                .with_table(table)
                .with_column(column)
                .with_message(message),

            DeltaError::DuplicateColumn { column } => ExError::new(ExErrorKind::InvalidInput)
                .with_column(column)
                .with_message(message),

            DeltaError::DuplicateKey { key, table } => ExError::new(ExErrorKind::DuplicateKey)
                .with_table(table)
                .with_key(key)
                .with_message(message),

            DeltaError::NullKey { table, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_table(table)
                .with_message(message),

            DeltaError::RowWidthMismatch { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            DeltaError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::Schema)
            .with_op("compute_delta")
            .with_table(TableRole::Prior)
            .with_column("employee_number")
            .with_message("missing key column");

        let text = err.to_string();
        assert!(text.starts_with("[ERR_SCHEMA] in operation 'compute_delta'"));
        assert!(text.contains("(table: prior)"));
        assert!(text.contains("(column: employee_number)"));
    }

    #[test]
    fn test_display_without_context_is_code_only() {
        let err = ExError::new(ExErrorKind::Internal);
        assert_eq!(err.to_string(), "[ERR_INTERNAL]");
    }
}
