//! Single-node table store: schema-defined tables persisted under a storage
//! root, with filtered and projected scans plus in-place update and delete.

pub mod config;
pub mod engine;
pub mod error;
pub mod manager;
pub mod storage;
pub mod types;

pub use config::StoreOptions;
pub use engine::{CompareOp, Filter, ProjectedRow, SelectedColumns};
pub use error::{StoreError, StoreResult};
pub use manager::TableManager;
pub use storage::{Column, DiskStore, MemStore, Schema, TableStore};
pub use types::Row;
pub use types::datatype::DataType;
pub use types::value::Value;
