use std::fs::{self, File};
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::StoreOptions;
use crate::error::{StoreError, StoreResult};
use crate::storage::Schema;
use crate::types::Row;

pub(crate) mod codec;
mod engine_impl;

const TABLE_EXT: &str = "tbl";

/// Disk-backed storage: one `<root>/tables/<name>.tbl` file per table.
///
/// Nothing is cached between calls; every load reads the file.
#[derive(Debug)]
pub struct DiskStore {
    root: PathBuf,
    sync_writes: bool,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(&StoreOptions::new(root))
    }

    pub fn open(options: &StoreOptions) -> StoreResult<Self> {
        initialize_layout(&options.root)?;
        Ok(Self {
            root: options.root.clone(),
            sync_writes: options.sync_writes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tables_dir(&self) -> PathBuf {
        self.root.join("tables")
    }

    fn table_file_path(&self, table: &str) -> PathBuf {
        self.tables_dir().join(format!("{table}.{TABLE_EXT}"))
    }

    fn tmp_file_path(&self, table: &str) -> PathBuf {
        self.tables_dir().join(format!("{table}.{TABLE_EXT}.tmp"))
    }

    fn open_table_file(&self, table: &str) -> StoreResult<File> {
        File::open(self.table_file_path(table)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::not_found(table),
            _ => StoreError::io(format!("Failed to open table file for '{table}'"), e),
        })
    }

    /// Reads the header and, if `with_rows`, every row line after it.
    fn read_table(&self, table: &str, with_rows: bool) -> StoreResult<(Schema, Vec<Row>)> {
        let file = self.open_table_file(table)?;
        let mut lines = BufReader::new(file).lines();
        let read_err = |line: usize, e: std::io::Error| match e.kind() {
            ErrorKind::InvalidData => corrupt(table, line, format!("line is not valid UTF-8: {e}")),
            _ => StoreError::io(format!("Failed to read table file for '{table}'"), e),
        };

        let header = match lines.next() {
            Some(line) => line.map_err(|e| read_err(1, e))?,
            None => return Err(corrupt(table, 1, "missing table header".to_string())),
        };
        let schema = codec::decode_header(&header).map_err(|reason| corrupt(table, 1, reason))?;
        if !with_rows {
            return Ok((schema, Vec::new()));
        }

        let mut rows: Vec<Row> = Vec::new();
        for (i, line) in lines.enumerate() {
            let line_no = i + 2;
            let line = line.map_err(|e| read_err(line_no, e))?;
            if line.is_empty() {
                return Err(corrupt(table, line_no, "empty row line".to_string()));
            }
            let row = codec::decode_row(&line, &schema).map_err(|reason| corrupt(table, line_no, reason))?;
            rows.push(row);
        }
        Ok((schema, rows))
    }

    fn sync_dir(&self) {
        if self.sync_writes {
            if let Ok(dir) = File::open(self.tables_dir()) {
                let _ = dir.sync_all();
            }
        }
    }
}

fn corrupt(table: &str, line: usize, reason: String) -> StoreError {
    warn!(table, line, %reason, "corrupt table file");
    StoreError::Corrupt {
        table: table.to_string(),
        line,
        reason,
    }
}

fn initialize_layout(root: &Path) -> StoreResult<()> {
    fs::create_dir_all(root).map_err(|e| StoreError::io("Failed to create storage root", e))?;
    fs::create_dir_all(root.join("tables"))
        .map_err(|e| StoreError::io("Failed to create tables directory", e))?;
    Ok(())
}
