use std::fmt;

/// Column type. `VarChar` carries its maximum length in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    VarChar(usize),
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::VarChar(_) => "varchar",
        }
    }

    /// Declared length, present only for `VarChar`.
    pub fn length(&self) -> Option<usize> {
        match self {
            DataType::Int => None,
            DataType::VarChar(n) => Some(*n),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "int"),
            DataType::VarChar(n) => write!(f, "varchar({n})"),
        }
    }
}

/// Rebuilds a column type from its persisted tag and optional length.
pub fn parse_datatype(tag: &str, length: Option<usize>) -> Result<DataType, String> {
    match (tag.to_lowercase().as_str(), length) {
        ("int", None) => Ok(DataType::Int),
        ("int", Some(n)) => Err(format!("Type 'int' does not take a length but got {n}")),
        ("varchar", Some(n)) if n > 0 => Ok(DataType::VarChar(n)),
        ("varchar", Some(_)) => Err("Type 'varchar' needs a positive length".to_string()),
        ("varchar", None) => Err("Type 'varchar' is missing its length".to_string()),
        (other, _) => Err(format!("Unknown type '{other}'. Use int|varchar")),
    }
}
