use std::cmp::Ordering;
use std::fmt;

use crate::types::datatype::DataType;

/// A typed literal occupying one row position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Checks that `value` may occupy a column of type `dtype`.
///
/// `Null` fits every column. Text length is counted in chars.
pub fn check_value(dtype: &DataType, value: &Value) -> Result<(), String> {
    match (dtype, value) {
        (_, Value::Null) => Ok(()),
        (DataType::Int, Value::Int(_)) => Ok(()),
        (DataType::VarChar(max), Value::Text(s)) => {
            let len = s.chars().count();
            if len > *max {
                return Err(format!("Expected varchar({max}) but got length {len}"));
            }
            Ok(())
        }
        (dtype, other) => Err(format!("Expected {} but got {}", dtype.name(), other.type_name())),
    }
}

/// Parses a raw persisted payload into a value of the given column type.
pub fn parse_value(dtype: &DataType, token: &str) -> Result<Value, String> {
    match dtype {
        DataType::Int => {
            let n: i64 = token
                .parse()
                .map_err(|_| format!("Expected int but got '{token}'"))?;
            Ok(Value::Int(n))
        }
        DataType::VarChar(_) => {
            let value = Value::Text(token.to_string());
            check_value(dtype, &value)?;
            Ok(value)
        }
    }
}

/// Orders two non-null values of the same variant. Anything else is unordered.
pub fn compare_values(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
