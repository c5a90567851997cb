use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Options for opening a disk-backed table manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Directory holding every table of one manager. Created if missing.
    pub root: PathBuf,
    /// fsync table files (and the table directory after a rewrite).
    #[serde(default = "default_sync_writes")]
    pub sync_writes: bool,
}

fn default_sync_writes() -> bool {
    true
}

impl StoreOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sync_writes: default_sync_writes(),
        }
    }

    pub fn sync_writes(mut self, enabled: bool) -> Self {
        self.sync_writes = enabled;
        self
    }

    pub fn from_json_str(input: &str) -> StoreResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            StoreError::io(
                "Malformed store options",
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    pub fn from_json_file(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::io(format!("Failed to read options file {}", path.display()), e))?;
        Self::from_json_str(&content)
    }
}
