//! Predicate matching and column projection over decoded rows.
//!
//! Everything here is pure: no I/O, no mutation of the input row.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::{StoreError, StoreResult};
use crate::storage::Schema;
use crate::types::Row;
use crate::types::datatype::DataType;
use crate::types::value::{Value, compare_values};

/// Comparison applied between a row cell and a filter literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }

    fn evaluate(&self, cell: &Value, rhs: &Value) -> bool {
        match self {
            CompareOp::Eq => cell == rhs,
            CompareOp::Ne => cell != rhs,
            // Ordering never holds against null or across variants.
            CompareOp::Lt => compare_values(cell, rhs) == Some(Ordering::Less),
            CompareOp::Lte => matches!(compare_values(cell, rhs), Some(Ordering::Less | Ordering::Equal)),
            CompareOp::Gt => compare_values(cell, rhs) == Some(Ordering::Greater),
            CompareOp::Gte => matches!(compare_values(cell, rhs), Some(Ordering::Greater | Ordering::Equal)),
        }
    }
}

impl FromStr for CompareOp {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(CompareOp::Eq),
            "!=" | "<>" => Ok(CompareOp::Ne),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            other => Err(StoreError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `column <op> value` predicate. A slice of filters is a conjunction.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

impl Filter {
    /// Builds a filter from an operator string such as `"="` or `">="`.
    pub fn new(column: impl Into<String>, op: &str, value: impl Into<Value>) -> StoreResult<Self> {
        Ok(Self::with_op(column, op.parse()?, value))
    }

    pub fn with_op(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_op(column, CompareOp::Eq, value)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.value)
    }
}

/// Ordered column names to project. Empty selects every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedColumns {
    pub columns: Vec<String>,
}

impl SelectedColumns {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedColumns {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// One projected row: column names paired with values in requested order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedRow {
    fields: Vec<(String, Value)>,
}

impl ProjectedRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<(String, Value)> {
        self.fields
    }
}

impl Index<&str> for ProjectedRow {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `column` was not projected. Use [`ProjectedRow::get`] to
    /// look a column up fallibly.
    fn index(&self, column: &str) -> &Value {
        match self.get(column) {
            Some(value) => value,
            None => panic!("column '{column}' is not part of this projection"),
        }
    }
}

impl IntoIterator for ProjectedRow {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// A filter resolved against a schema: column position plus literal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoundFilter<'a> {
    idx: usize,
    op: CompareOp,
    value: &'a Value,
}

/// Resolves filter columns to positions and type-checks the literals.
pub(crate) fn bind_filters<'a>(
    schema: &Schema,
    filters: &'a [Filter],
) -> StoreResult<Vec<BoundFilter<'a>>> {
    filters
        .iter()
        .map(|f| {
            let idx = schema
                .column_index(&f.column)
                .ok_or_else(|| StoreError::unknown_column(&f.column))?;
            let dtype = &schema.columns[idx].dtype;
            if !literal_fits(dtype, &f.value) {
                return Err(StoreError::TypeMismatch {
                    column: f.column.clone(),
                    reason: format!(
                        "cannot compare {} column with {} literal",
                        dtype.name(),
                        f.value.type_name()
                    ),
                });
            }
            Ok(BoundFilter {
                idx,
                op: f.op,
                value: &f.value,
            })
        })
        .collect()
}

// Filter literals are not held to the varchar bound; an over-long literal
// simply never equals a stored value.
fn literal_fits(dtype: &DataType, value: &Value) -> bool {
    matches!(
        (dtype, value),
        (_, Value::Null) | (DataType::Int, Value::Int(_)) | (DataType::VarChar(_), Value::Text(_))
    )
}

pub(crate) fn row_matches(row: &Row, filters: &[BoundFilter<'_>]) -> bool {
    filters.iter().all(|f| {
        row.get(f.idx)
            .is_some_and(|cell| f.op.evaluate(cell, f.value))
    })
}

/// Checks every filter against the schema without needing a row.
pub fn validate_filters(schema: &Schema, filters: &[Filter]) -> StoreResult<()> {
    bind_filters(schema, filters).map(|_| ())
}

/// True when `row` passes every filter. Unknown columns are an error, not a miss.
pub fn matches(row: &Row, schema: &Schema, filters: &[Filter]) -> StoreResult<bool> {
    let bound = bind_filters(schema, filters)?;
    Ok(row_matches(row, &bound))
}

/// Maps selected names to schema positions, keeping caller order.
pub fn resolve_projection(schema: &Schema, selected: &SelectedColumns) -> StoreResult<Vec<usize>> {
    if selected.columns.is_empty() {
        return Ok((0..schema.column_count()).collect());
    }
    let mut seen: HashSet<&str> = HashSet::new();
    let mut idxs: Vec<usize> = Vec::with_capacity(selected.columns.len());
    for name in &selected.columns {
        let idx = schema
            .column_index(name)
            .ok_or_else(|| StoreError::unknown_column(name))?;
        if seen.insert(name.as_str()) {
            idxs.push(idx);
        }
    }
    Ok(idxs)
}

pub(crate) fn project_resolved(row: &Row, schema: &Schema, idxs: &[usize]) -> ProjectedRow {
    ProjectedRow {
        fields: idxs
            .iter()
            .map(|&i| {
                let value = row.get(i).cloned().unwrap_or(Value::Null);
                (schema.columns[i].name.clone(), value)
            })
            .collect(),
    }
}

/// Projects `row` onto the selected columns in the requested order.
pub fn project(row: &Row, schema: &Schema, selected: &SelectedColumns) -> StoreResult<ProjectedRow> {
    let idxs = resolve_projection(schema, selected)?;
    Ok(project_resolved(row, schema, &idxs))
}
