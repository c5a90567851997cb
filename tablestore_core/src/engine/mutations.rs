use crate::engine::filter_project::{BoundFilter, row_matches};
use crate::error::{StoreError, StoreResult};
use crate::storage::Schema;
use crate::types::Row;
use crate::types::value::{Value, check_value};

/// Resolves `(column, value)` assignments to positions and checks each value
/// against its column type before anything is touched.
pub(crate) fn compile_assignments<I, S>(schema: &Schema, assignments: I) -> StoreResult<Vec<(usize, Value)>>
where
    I: IntoIterator<Item = (S, Value)>,
    S: AsRef<str>,
{
    let mut compiled: Vec<(usize, Value)> = Vec::new();
    for (column, value) in assignments {
        let column = column.as_ref();
        let idx = schema
            .column_index(column)
            .ok_or_else(|| StoreError::unknown_column(column))?;
        check_value(&schema.columns[idx].dtype, &value).map_err(|reason| {
            StoreError::TypeMismatch {
                column: column.to_string(),
                reason,
            }
        })?;
        compiled.push((idx, value));
    }
    Ok(compiled)
}

/// Overwrites the assigned cells of every matching row. Returns the match count.
pub(crate) fn apply_update(rows: &mut [Row], filters: &[BoundFilter<'_>], compiled: &[(usize, Value)]) -> usize {
    let mut updated = 0usize;
    for row in rows.iter_mut() {
        if !row_matches(row, filters) {
            continue;
        }
        for (idx, new_value) in compiled {
            if let Some(slot) = row.get_mut(*idx) {
                *slot = new_value.clone();
            }
        }
        updated += 1;
    }
    updated
}

/// Drops every matching row, keeping the rest in their original order.
pub(crate) fn apply_delete(rows: Vec<Row>, filters: &[BoundFilter<'_>]) -> (Vec<Row>, usize) {
    let before = rows.len();
    let kept: Vec<Row> = rows
        .into_iter()
        .filter(|row| !row_matches(row, filters))
        .collect();
    let deleted = before - kept.len();
    (kept, deleted)
}
