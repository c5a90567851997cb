use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::StoreOptions;
use crate::engine::filter_project::{
    Filter, ProjectedRow, SelectedColumns, bind_filters, project_resolved, resolve_projection,
    row_matches,
};
use crate::engine::mutations::{apply_delete, apply_update, compile_assignments};
use crate::error::{StoreError, StoreResult};
use crate::storage::{DiskStore, Schema, TableStore};
use crate::types::Row;
use crate::types::value::Value;

/// Orchestrates table creation, inserts, scans, updates and deletes over a
/// [`TableStore`].
///
/// Every call runs to completion synchronously. Calls against the same table
/// are serialized by a per-table reader/writer lock: scans share it, while
/// mutations hold it exclusively across load, mutate and save. The storage
/// root is assumed to be owned by this manager alone.
#[derive(Debug)]
pub struct TableManager<S: TableStore = DiskStore> {
    store: S,
    locks: Mutex<HashMap<String, Arc<RwLock<()>>>>,
}

impl TableManager<DiskStore> {
    /// Binds a manager to `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(StoreOptions::new(root))
    }

    pub fn open(options: StoreOptions) -> StoreResult<Self> {
        let store = DiskStore::open(&options)?;
        let tables = store.list()?;
        info!(
            root = %options.root.display(),
            tables = tables.len(),
            sync_writes = options.sync_writes,
            "opened table store"
        );
        Ok(Self::with_store(store))
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }
}

impl<S: TableStore> TableManager<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn table_lock(&self, table: &str) -> Arc<RwLock<()>> {
        self.locks
            .lock()
            .entry(table.to_string())
            .or_default()
            .clone()
    }

    /// Runs `op` under the table's shared lock.
    fn with_read<T>(&self, table: &str, op: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
        let lock = self.table_lock(table);
        let result = {
            let _guard = lock.read();
            op()
        };
        self.release_if_missing(table, lock, &result);
        result
    }

    /// Runs `op` under the table's exclusive lock.
    fn with_write<T>(&self, table: &str, op: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
        let lock = self.table_lock(table);
        let result = {
            let _guard = lock.write();
            op()
        };
        self.release_if_missing(table, lock, &result);
        result
    }

    /// Drops the lock entry of a table that turned out not to exist, unless
    /// another caller still holds it. Clones are only handed out under the
    /// map mutex, so a count of one cannot race upward.
    fn release_if_missing<T>(&self, table: &str, lock: Arc<RwLock<()>>, result: &StoreResult<T>) {
        if !matches!(result, Err(StoreError::NotFound { .. })) {
            return;
        }
        let mut locks = self.locks.lock();
        drop(lock);
        if locks.get(table).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(table);
        }
    }

    #[cfg(test)]
    fn lock_entries(&self) -> usize {
        self.locks.lock().len()
    }

    /// Persists a new, empty table. Existing tables are never touched.
    pub fn create_table(&self, table: &str, schema: &Schema) -> StoreResult<()> {
        validate_table_name(table)?;
        schema.validate()?;
        self.with_write(table, || {
            if self.store.exists(table)? {
                return Err(StoreError::already_exists(table));
            }
            self.store.create(table, schema)?;
            info!(table, columns = schema.column_count(), "created table");
            Ok(())
        })
    }

    /// Validates `row` against the table schema, then appends it.
    pub fn insert(&self, table: &str, row: Row) -> StoreResult<()> {
        validate_table_name(table)?;
        self.with_write(table, || {
            let schema = self.store.load_schema(table)?;
            schema
                .check_row(&row)
                .map_err(|reason| StoreError::SchemaMismatch {
                    table: table.to_string(),
                    reason,
                })?;
            self.store.append(table, &schema, &row)?;
            debug!(table, "inserted 1 row");
            Ok(())
        })
    }

    /// Returns every row passing all `filters`, projected onto `selected` in
    /// the requested order. No filters matches every row.
    pub fn get_all_data(
        &self,
        table: &str,
        filters: &[Filter],
        selected: &SelectedColumns,
    ) -> StoreResult<Vec<ProjectedRow>> {
        validate_table_name(table)?;
        self.with_read(table, || {
            let (schema, rows) = self.store.load(table)?;
            let bound = bind_filters(&schema, filters)?;
            let idxs = resolve_projection(&schema, selected)?;
            let out: Vec<ProjectedRow> = rows
                .iter()
                .filter(|row| row_matches(row, &bound))
                .map(|row| project_resolved(row, &schema, &idxs))
                .collect();
            debug!(table, scanned = rows.len(), returned = out.len(), "scanned table");
            Ok(out)
        })
    }

    /// Number of rows passing all `filters`.
    pub fn count(&self, table: &str, filters: &[Filter]) -> StoreResult<usize> {
        validate_table_name(table)?;
        self.with_read(table, || {
            let (schema, rows) = self.store.load(table)?;
            let bound = bind_filters(&schema, filters)?;
            Ok(rows.iter().filter(|row| row_matches(row, &bound)).count())
        })
    }

    /// Sets the assigned columns on every row passing all `filters` and
    /// rewrites the table. Returns how many rows matched.
    pub fn update<I, K>(&self, table: &str, assignments: I, filters: &[Filter]) -> StoreResult<usize>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        validate_table_name(table)?;
        self.with_write(table, || {
            let (schema, mut rows) = self.store.load(table)?;
            let bound = bind_filters(&schema, filters)?;
            let compiled = compile_assignments(&schema, assignments)?;
            let updated = apply_update(&mut rows, &bound, &compiled);
            if updated > 0 {
                self.store.save(table, &schema, &rows)?;
            }
            debug!(table, updated, "updated rows");
            Ok(updated)
        })
    }

    /// Removes every row passing all `filters`. Survivors keep their order.
    pub fn delete(&self, table: &str, filters: &[Filter]) -> StoreResult<usize> {
        validate_table_name(table)?;
        self.with_write(table, || {
            let (schema, rows) = self.store.load(table)?;
            let bound = bind_filters(&schema, filters)?;
            let (kept, deleted) = apply_delete(rows, &bound);
            if deleted > 0 {
                self.store.save(table, &schema, &kept)?;
            }
            debug!(table, deleted, remaining = kept.len(), "deleted rows");
            Ok(deleted)
        })
    }

    /// Loads a table's schema without reading its rows.
    pub fn schema(&self, table: &str) -> StoreResult<Schema> {
        validate_table_name(table)?;
        self.with_read(table, || self.store.load_schema(table))
    }

    pub fn has_table(&self, table: &str) -> StoreResult<bool> {
        if validate_table_name(table).is_err() {
            return Ok(false);
        }
        self.store.exists(table)
    }

    /// Sorted names of every table under this manager.
    pub fn table_names(&self) -> StoreResult<Vec<String>> {
        self.store.list()
    }
}

/// Table names address a file, so only `[A-Za-z0-9_-]` is accepted.
fn validate_table_name(table: &str) -> StoreResult<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(table.to_string()))
    }
}
