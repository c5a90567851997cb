use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};

use super::{DiskStore, TABLE_EXT, codec};
use crate::error::{StoreError, StoreResult};
use crate::storage::Schema;
use crate::storage::engine::TableStore;
use crate::types::Row;

impl TableStore for DiskStore {
    fn exists(&self, table: &str) -> StoreResult<bool> {
        self.table_file_path(table)
            .try_exists()
            .map_err(|e| StoreError::io(format!("Failed to stat table file for '{table}'"), e))
    }

    fn create(&self, table: &str, schema: &Schema) -> StoreResult<()> {
        let header = codec::encode_header(schema).map_err(StoreError::InvalidSchema)?;
        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(self.table_file_path(table))
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::already_exists(table),
                _ => StoreError::io(format!("Failed to create table file for '{table}'"), e),
            })?;
        let write_err = |e| StoreError::io(format!("Failed to write table header for '{table}'"), e);
        writeln!(file, "{header}").map_err(write_err)?;
        if self.sync_writes {
            file.sync_all().map_err(write_err)?;
        }
        self.sync_dir();
        Ok(())
    }

    fn load_schema(&self, table: &str) -> StoreResult<Schema> {
        self.read_table(table, false).map(|(schema, _)| schema)
    }

    fn load(&self, table: &str) -> StoreResult<(Schema, Vec<Row>)> {
        self.read_table(table, true)
    }

    fn append(&self, table: &str, _schema: &Schema, row: &Row) -> StoreResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.table_file_path(table))
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::not_found(table),
                _ => StoreError::io(format!("Failed to open table file for '{table}'"), e),
            })?;
        let write_err = |e| StoreError::io(format!("Failed to append row to '{table}'"), e);
        let line = format!("{}\n", codec::encode_row(row));
        file.write_all(line.as_bytes()).map_err(write_err)?;
        if self.sync_writes {
            file.sync_data().map_err(write_err)?;
        }
        Ok(())
    }

    fn save(&self, table: &str, schema: &Schema, rows: &[Row]) -> StoreResult<()> {
        if !self.exists(table)? {
            return Err(StoreError::not_found(table));
        }
        let header = codec::encode_header(schema).map_err(StoreError::InvalidSchema)?;
        let tmp_path = self.tmp_file_path(table);
        let write_err = |e| StoreError::io(format!("Failed to write table snapshot for '{table}'"), e);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(write_err)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{header}").map_err(write_err)?;
        for row in rows {
            writeln!(out, "{}", codec::encode_row(row)).map_err(write_err)?;
        }
        let file = out.into_inner().map_err(|e| write_err(e.into_error()))?;
        if self.sync_writes {
            file.sync_all().map_err(write_err)?;
        }
        drop(file);

        fs::rename(&tmp_path, self.table_file_path(table)).map_err(write_err)?;
        self.sync_dir();
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let entries = fs::read_dir(self.tables_dir())
            .map_err(|e| StoreError::io("Failed to list tables directory", e))?;
        let mut names: Vec<String> = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| StoreError::io("Failed to list tables directory", e))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some(TABLE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
