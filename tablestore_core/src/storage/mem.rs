use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::storage::Schema;
use crate::storage::engine::TableStore;
use crate::types::Row;

/// In-memory storage implementation using HashMap
#[derive(Debug, Default)]
pub struct MemStore {
    tables: RwLock<HashMap<String, (Schema, Vec<Row>)>>,
}

impl MemStore {
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for MemStore {
    fn exists(&self, table: &str) -> StoreResult<bool> {
        Ok(self.tables.read().contains_key(table))
    }

    fn create(&self, table: &str, schema: &Schema) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables.contains_key(table) {
            return Err(StoreError::already_exists(table));
        }
        tables.insert(table.to_string(), (schema.clone(), Vec::new()));
        Ok(())
    }

    fn load_schema(&self, table: &str) -> StoreResult<Schema> {
        self.tables
            .read()
            .get(table)
            .map(|(schema, _)| schema.clone())
            .ok_or_else(|| StoreError::not_found(table))
    }

    fn load(&self, table: &str) -> StoreResult<(Schema, Vec<Row>)> {
        self.tables
            .read()
            .get(table)
            .cloned()
            .ok_or_else(|| StoreError::not_found(table))
    }

    fn append(&self, table: &str, _schema: &Schema, row: &Row) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let (_, rows) = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::not_found(table))?;
        rows.push(row.clone());
        Ok(())
    }

    fn save(&self, table: &str, _schema: &Schema, rows: &[Row]) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let (_, stored) = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::not_found(table))?;
        *stored = rows.to_vec();
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
