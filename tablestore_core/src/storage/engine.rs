use crate::error::StoreResult;
use crate::storage::Schema;
use crate::types::Row;

/// Storage engine trait - maps a table name to its schema and rows
/// (in-memory, disk-based, etc.)
pub trait TableStore: Send + Sync {
    /// Reports whether the table is registered, without reading its rows
    fn exists(&self, table: &str) -> StoreResult<bool>;

    /// Registers an empty table. Fails with `AlreadyExists` if present
    fn create(&self, table: &str, schema: &Schema) -> StoreResult<()>;

    /// Loads only the schema of a table
    fn load_schema(&self, table: &str) -> StoreResult<Schema>;

    /// Loads the schema and every row in stored order
    fn load(&self, table: &str) -> StoreResult<(Schema, Vec<Row>)>;

    /// Appends one already validated row
    fn append(&self, table: &str, schema: &Schema, row: &Row) -> StoreResult<()>;

    /// Replaces the stored rows of a table as a unit
    fn save(&self, table: &str, schema: &Schema, rows: &[Row]) -> StoreResult<()>;

    /// Names of every registered table, sorted
    fn list(&self) -> StoreResult<Vec<String>>;
}
