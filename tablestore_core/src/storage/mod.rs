pub mod schema;
pub mod engine;
pub mod disk;
pub mod mem;

// Re-export main types for convenience
pub use schema::{Schema, Column};
pub use engine::TableStore;
pub use disk::DiskStore;
pub use mem::MemStore;
