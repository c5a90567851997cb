pub mod filter_project;
pub(crate) mod mutations;

pub use filter_project::{
    CompareOp, Filter, ProjectedRow, SelectedColumns, matches, project, resolve_projection,
    validate_filters,
};
