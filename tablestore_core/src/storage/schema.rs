use std::collections::HashSet;

use crate::error::{StoreError, StoreResult};
use crate::types::Row;
use crate::types::datatype::DataType;
use crate::types::value::check_value;

/// Represents a single column in a table schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub dtype: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Int)
    }

    pub fn varchar(name: impl Into<String>, length: usize) -> Self {
        Self::new(name, DataType::VarChar(length))
    }
}

/// Represents the schema of a table. Column order is the positional row layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    /// Creates a new schema from a list of column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Returns the number of columns in this schema
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the named column in the row layout
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Rejects empty schemas, blank or duplicate names and zero-length varchars.
    pub fn validate(&self) -> StoreResult<()> {
        if self.columns.is_empty() {
            return Err(StoreError::InvalidSchema(
                "a table needs at least one column".to_string(),
            ));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for col in &self.columns {
            if col.name.trim().is_empty() {
                return Err(StoreError::InvalidSchema(
                    "column names cannot be empty".to_string(),
                ));
            }
            if !seen.insert(col.name.as_str()) {
                return Err(StoreError::InvalidSchema(format!(
                    "duplicate column '{}'",
                    col.name
                )));
            }
            if col.dtype == DataType::VarChar(0) {
                return Err(StoreError::InvalidSchema(format!(
                    "column '{}' needs a positive varchar length",
                    col.name
                )));
            }
        }
        Ok(())
    }

    /// Checks value count, per-position type and varchar bounds.
    pub fn check_row(&self, row: &Row) -> Result<(), String> {
        if row.len() != self.column_count() {
            return Err(format!(
                "Expected {} values but got {}",
                self.column_count(),
                row.len()
            ));
        }
        for (col, value) in self.columns.iter().zip(row) {
            check_value(&col.dtype, value).map_err(|e| format!("column '{}': {e}", col.name))?;
        }
        Ok(())
    }
}
