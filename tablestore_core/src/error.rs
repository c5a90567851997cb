//! Error types shared by every table store operation.

use std::io;

use thiserror::Error;

/// Result type for table store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the table manager and its storage backends.
///
/// Each variant names one cause so callers can branch on it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A table with this name is already registered under the root.
    #[error("table '{table}' already exists")]
    AlreadyExists { table: String },

    /// No table with this name exists under the root.
    #[error("table '{table}' does not exist")]
    NotFound { table: String },

    /// An inserted row does not fit the table schema.
    #[error("row does not match schema of '{table}': {reason}")]
    SchemaMismatch { table: String, reason: String },

    /// A filter, projection or assignment names a column the schema lacks.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// A literal is incompatible with the column it targets.
    #[error("type mismatch for column '{column}': {reason}")]
    TypeMismatch { column: String, reason: String },

    /// The schema handed to `create_table` is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The table name cannot address a durable unit.
    #[error("invalid table name '{0}'")]
    InvalidTableName(String),

    /// The filter operator is not one the evaluator understands.
    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    /// Persisted table data failed to decode.
    #[error("corrupt table file for '{table}' at line {line}: {reason}")]
    Corrupt {
        table: String,
        line: usize,
        reason: String,
    },

    /// Underlying storage could not be read or written.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn not_found(table: &str) -> Self {
        StoreError::NotFound {
            table: table.to_string(),
        }
    }

    pub(crate) fn already_exists(table: &str) -> Self {
        StoreError::AlreadyExists {
            table: table.to_string(),
        }
    }

    pub(crate) fn unknown_column(column: &str) -> Self {
        StoreError::UnknownColumn {
            column: column.to_string(),
        }
    }
}
